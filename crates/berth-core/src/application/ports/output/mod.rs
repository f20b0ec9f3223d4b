//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the init-service workflow needs from external
//! systems. The `berth-adapters` crate provides implementations; the CLI
//! provides the terminal-facing ones (prompter, progress reporter).
//!
//! Every call is blocking from the workflow's point of view. Timeouts and
//! cancellation, if any, belong to the implementation.

use std::path::{Path, PathBuf};

use crate::domain::{Application, HealthCheckSpec, Manifest, Workload};
use crate::error::BerthResult;

/// Validator run by a text prompt before it accepts an answer.
pub type TextValidator = fn(&str) -> Result<(), String>;

/// Port for filesystem existence checks.
///
/// Implemented by:
/// - `berth_adapters::filesystem::LocalFilesystem` (production)
/// - `berth_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for interactive questions.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter: Send + Sync {
    /// Ask the user to pick exactly one of `options`; returns the chosen option.
    fn select_one(&self, message: &str, help: &str, options: &[String]) -> BerthResult<String>;

    /// Ask for free text. An empty `default` means no default.
    fn get_text(
        &self,
        message: &str,
        help: &str,
        default: &str,
        validator: Option<TextValidator>,
    ) -> BerthResult<String>;
}

/// Prompt texts for choosing a Dockerfile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFilePrompts {
    pub prompt: String,
    pub path_prompt: String,
    pub help: String,
    pub path_help: String,
}

/// What the user picked when asked for a Dockerfile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildFileChoice {
    Dockerfile(PathBuf),
    /// Skip building and deploy a pre-built image instead.
    ExistingImage,
}

/// Port for choosing a Dockerfile under a search root.
///
/// Implemented by:
/// - `berth_adapters::selector::DockerfileSelector`
#[cfg_attr(test, mockall::automock)]
pub trait BuildFileSelector: Send + Sync {
    fn choose_build_file(
        &self,
        prompts: &BuildFilePrompts,
        search_root: &Path,
    ) -> BerthResult<BuildFileChoice>;
}

/// Port for probing a Dockerfile.
///
/// Implemented by:
/// - `berth_adapters::dockerfile::DockerfileParser`
#[cfg_attr(test, mockall::automock)]
pub trait BuildFileParser: Send + Sync {
    /// Ports declared with `EXPOSE`, in declaration order.
    fn exposed_ports(&self, dockerfile: &Path) -> BerthResult<Vec<u16>>;

    /// The declared `HEALTHCHECK`, or `None` when there isn't one.
    fn health_check(&self, dockerfile: &Path) -> BerthResult<Option<HealthCheckSpec>>;
}

/// Port for the workload/application store.
///
/// Implemented by:
/// - `berth_adapters::store::JsonFileStore` (production)
/// - `berth_adapters::store::InMemoryStore` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait WorkloadStore: Send + Sync {
    /// All workloads registered in an application.
    fn list_services(&self, app_name: &str) -> BerthResult<Vec<Workload>>;

    /// Register a workload.
    fn create_service(&self, workload: &Workload) -> BerthResult<()>;

    /// Fetch an application by name.
    fn get_application(&self, name: &str) -> BerthResult<Application>;
}

/// Port for the remote application registry.
///
/// Implemented by:
/// - `berth_adapters::deployer::RegistryDeployer`
#[cfg_attr(test, mockall::automock)]
pub trait Deployer: Send + Sync {
    /// Link a service to its application.
    fn add_service_to_app(&self, app: &Application, service_name: &str) -> BerthResult<()>;
}

/// Port for persisting manifests.
///
/// Implemented by:
/// - `berth_adapters::manifest::WorkspaceManifestWriter`
#[cfg_attr(test, mockall::automock)]
pub trait ManifestWriter: Send + Sync {
    /// The application's deployment root directory.
    fn root_path(&self) -> BerthResult<PathBuf>;

    /// Write a manifest beneath the deployment root; returns the written path.
    fn write_service_manifest(&self, manifest: &Manifest, service_name: &str)
    -> BerthResult<PathBuf>;
}

/// How a long-running step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressOutcome {
    Success,
    Failure,
}

/// Port for rendering progress of long-running steps.
#[cfg_attr(test, mockall::automock)]
pub trait ProgressReporter: Send + Sync {
    fn start(&self, message: &str);
    fn stop(&self, outcome: ProgressOutcome, message: &str);
}
