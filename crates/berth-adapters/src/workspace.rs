//! Workspace discovery.
//!
//! A workspace is a directory containing `berth/.workspace`, a small YAML
//! file naming the application. Everything berth writes lives under the
//! `berth/` deployment root.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use berth_core::{
    application::ApplicationError,
    domain::DomainValidator,
    error::{BerthError, BerthResult},
};

use crate::filesystem::map_io_error;

pub const DEPLOYMENT_DIR: &str = "berth";
pub const WORKSPACE_FILE: &str = ".workspace";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct WorkspaceFile {
    application: String,
}

/// A discovered or freshly created workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
    application: String,
}

impl Workspace {
    /// Directory containing `berth/`.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn application(&self) -> &str {
        &self.application
    }

    /// `<root>/berth`: manifests, store and registry live here.
    pub fn deployment_root(&self) -> PathBuf {
        self.root.join(DEPLOYMENT_DIR)
    }

    /// Walk up from `start` to the first directory holding a workspace file.
    pub fn discover(start: &Path) -> BerthResult<Option<Self>> {
        for dir in start.ancestors() {
            let marker = dir.join(DEPLOYMENT_DIR).join(WORKSPACE_FILE);
            if !marker.is_file() {
                continue;
            }
            let raw = std::fs::read_to_string(&marker)
                .map_err(|e| map_io_error(&marker, e, "read workspace file"))?;
            let file: WorkspaceFile = serde_yaml::from_str(&raw).map_err(|e| {
                BerthError::Configuration {
                    message: format!("{} is invalid: {}", marker.display(), e),
                }
            })?;
            debug!(root = %dir.display(), app = %file.application, "Workspace found");
            return Ok(Some(Self {
                root: dir.to_path_buf(),
                application: file.application,
            }));
        }
        Ok(None)
    }

    /// Create `berth/.workspace` under `root` for `application`.
    ///
    /// Fails if `root` already belongs to a different application.
    pub fn init(root: &Path, application: &str) -> BerthResult<Self> {
        let application = application.trim();
        DomainValidator::validate_app_name(application)?;

        if let Some(existing) = Self::discover(root)? {
            if existing.root == root && existing.application != application {
                return Err(BerthError::Configuration {
                    message: format!(
                        "{} already belongs to application {}",
                        root.display(),
                        existing.application
                    ),
                });
            }
        }

        let deployment_root = root.join(DEPLOYMENT_DIR);
        std::fs::create_dir_all(&deployment_root)
            .map_err(|e| map_io_error(&deployment_root, e, "create directory"))?;

        let marker = deployment_root.join(WORKSPACE_FILE);
        let body = serde_yaml::to_string(&WorkspaceFile {
            application: application.to_string(),
        })
        .map_err(|e| ApplicationError::FilesystemError {
            path: marker.clone(),
            reason: e.to_string(),
        })?;
        std::fs::write(&marker, body).map_err(|e| map_io_error(&marker, e, "write workspace file"))?;

        Ok(Self {
            root: root.to_path_buf(),
            application: application.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_then_discover_from_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        let created = Workspace::init(dir.path(), "phonetool").unwrap();

        let nested = dir.path().join("frontend/src");
        std::fs::create_dir_all(&nested).unwrap();
        let found = Workspace::discover(&nested).unwrap().unwrap();

        assert_eq!(found, created);
        assert_eq!(found.application(), "phonetool");
        assert_eq!(found.deployment_root(), dir.path().join("berth"));
    }

    #[test]
    fn no_workspace_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Workspace::discover(dir.path()).unwrap(), None);
    }

    #[test]
    fn init_is_idempotent_for_same_application() {
        let dir = tempfile::tempdir().unwrap();
        Workspace::init(dir.path(), "phonetool").unwrap();
        Workspace::init(dir.path(), "phonetool").unwrap();
        assert!(Workspace::init(dir.path(), "other").is_err());
    }

    #[test]
    fn init_rejects_blank_application() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Workspace::init(dir.path(), "  ").is_err());
    }

    #[test]
    fn invalid_workspace_file_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("berth")).unwrap();
        std::fs::write(dir.path().join("berth/.workspace"), "- not a map\n").unwrap();
        assert!(matches!(
            Workspace::discover(dir.path()),
            Err(BerthError::Configuration { .. })
        ));
    }
}
