//! Application registry: records which services belong to which application.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use berth_core::{
    application::{ApplicationError, ports::Deployer},
    domain::Application,
    error::BerthResult,
};

use crate::filesystem::map_io_error;

pub const REGISTRY_FILE: &str = ".registry.json";

/// Linked services keyed by `<account>/<application>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default)]
    pub links: BTreeMap<String, Vec<String>>,
}

impl Registry {
    pub fn key(app: &Application) -> String {
        format!("{}/{}", app.account_id, app.name)
    }

    pub fn services(&self, app: &Application) -> &[String] {
        self.links
            .get(&Self::key(app))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Deployer that keeps the registry in a JSON file.
#[derive(Debug, Clone)]
pub struct RegistryDeployer {
    path: PathBuf,
}

impl RegistryDeployer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_root(root: &Path) -> Self {
        Self::new(root.join(REGISTRY_FILE))
    }

    pub fn load(&self) -> BerthResult<Registry> {
        if !self.path.exists() {
            return Ok(Registry::default());
        }
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| map_io_error(&self.path, e, "read registry"))?;
        serde_json::from_str(&raw).map_err(|e| {
            ApplicationError::Deployer {
                reason: format!("{} is corrupt: {}", self.path.display(), e),
            }
            .into()
        })
    }

    fn save(&self, registry: &Registry) -> BerthResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| map_io_error(parent, e, "create directory"))?;
        }
        let json =
            serde_json::to_string_pretty(registry).map_err(|e| ApplicationError::Deployer {
                reason: e.to_string(),
            })?;
        std::fs::write(&self.path, json).map_err(|e| map_io_error(&self.path, e, "write registry"))
    }
}

impl Deployer for RegistryDeployer {
    #[instrument(skip_all, fields(app = %app.name, service = %service_name))]
    fn add_service_to_app(&self, app: &Application, service_name: &str) -> BerthResult<()> {
        let mut registry = self.load()?;
        let services = registry.links.entry(Registry::key(app)).or_default();

        if services.iter().any(|s| s == service_name) {
            debug!("Service already linked");
            return Ok(());
        }
        services.push(service_name.to_string());
        services.sort();
        self.save(&registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> Application {
        Application::new("phonetool", "123456789012")
    }

    #[test]
    fn links_service_to_application() {
        let dir = tempfile::tempdir().unwrap();
        let deployer = RegistryDeployer::in_root(dir.path());

        deployer.add_service_to_app(&app(), "frontend").unwrap();
        deployer.add_service_to_app(&app(), "api").unwrap();

        let registry = deployer.load().unwrap();
        assert_eq!(registry.services(&app()), ["api", "frontend"]);
    }

    #[test]
    fn linking_twice_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let deployer = RegistryDeployer::in_root(dir.path());

        deployer.add_service_to_app(&app(), "frontend").unwrap();
        deployer.add_service_to_app(&app(), "frontend").unwrap();

        assert_eq!(deployer.load().unwrap().services(&app()).len(), 1);
    }

    #[test]
    fn applications_are_keyed_by_account() {
        let dir = tempfile::tempdir().unwrap();
        let deployer = RegistryDeployer::in_root(dir.path());
        let other = Application::new("phonetool", "999999999999");

        deployer.add_service_to_app(&app(), "frontend").unwrap();

        assert!(deployer.load().unwrap().services(&other).is_empty());
    }

    #[test]
    fn corrupt_registry_is_a_linkage_failure() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(REGISTRY_FILE), "{").unwrap();
        let err = RegistryDeployer::in_root(dir.path())
            .add_service_to_app(&app(), "frontend")
            .unwrap_err();
        assert_eq!(
            err.category(),
            berth_core::error::ErrorCategory::Linkage
        );
    }
}
