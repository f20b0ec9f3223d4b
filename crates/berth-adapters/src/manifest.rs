//! Manifest writer: renders manifests as YAML under the deployment root.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use berth_core::{
    application::ports::ManifestWriter,
    domain::Manifest,
    error::{BerthError, BerthResult},
};

use crate::filesystem::map_io_error;

pub const MANIFEST_FILE: &str = "manifest.yml";

/// Render a manifest to YAML with a short header.
pub fn render(manifest: &Manifest) -> BerthResult<String> {
    let body = serde_yaml::to_string(manifest).map_err(|e| BerthError::Internal {
        message: format!("render manifest for {}: {}", manifest.name(), e),
    })?;
    Ok(format!(
        "# The manifest for the \"{}\" service.\n# Type: {}\n\n{}",
        manifest.name(),
        manifest.service_type(),
        body
    ))
}

/// Writes `<root>/<service>/manifest.yml`, replacing an existing file.
#[derive(Debug, Clone)]
pub struct WorkspaceManifestWriter {
    root: Option<PathBuf>,
}

impl WorkspaceManifestWriter {
    pub fn new(deployment_root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(deployment_root.into()),
        }
    }

    /// Writer for when no workspace was found; every call fails.
    pub fn without_workspace() -> Self {
        Self { root: None }
    }

    pub fn manifest_path(root: &Path, service_name: &str) -> PathBuf {
        root.join(service_name).join(MANIFEST_FILE)
    }
}

impl ManifestWriter for WorkspaceManifestWriter {
    fn root_path(&self) -> BerthResult<PathBuf> {
        self.root.clone().ok_or_else(|| BerthError::Configuration {
            message: "no workspace found; run `berth workspace init --app <name>` first".into(),
        })
    }

    #[instrument(skip_all, fields(service = %service_name))]
    fn write_service_manifest(
        &self,
        manifest: &Manifest,
        service_name: &str,
    ) -> BerthResult<PathBuf> {
        let root = self.root_path()?;
        let path = Self::manifest_path(&root, service_name);
        let content = render(manifest)?;

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| map_io_error(dir, e, "create directory"))?;
        }
        std::fs::write(&path, content).map_err(|e| map_io_error(&path, e, "write manifest"))?;

        debug!(path = %path.display(), "Manifest written");
        Ok(path)
    }
}
