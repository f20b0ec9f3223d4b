//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the collaborators
//! the workflow drives, not input validation. Input validation errors are
//! `DomainError` from `crate::domain`.
//!
//! Step failures wrap the collaborator's error as a boxed source and prefix
//! it with the step that failed, e.g. `select service type: <cause>`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::{BerthError, ErrorCategory};

/// Errors that occur during the Ask and Execute phases.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    // ── Interaction ────────────────────────────────────────────────────────
    #[error("select service type: {source}")]
    SelectServiceType { source: Box<BerthError> },

    #[error("get service name: {source}")]
    GetServiceName { source: Box<BerthError> },

    #[error("select Dockerfile: {source}")]
    SelectBuildFile { source: Box<BerthError> },

    #[error("get image location: {source}")]
    GetImageLocation { source: Box<BerthError> },

    /// The prompt UI itself failed (interrupted, no terminal, ...).
    #[error("{reason}")]
    Prompt { reason: String },

    // ── Resolution ─────────────────────────────────────────────────────────
    #[error("get port: {source}")]
    GetPort { source: Box<BerthError> },

    #[error("port {value} is invalid: {reason}")]
    InvalidPort { value: String, reason: String },

    #[error("image location cannot be empty")]
    EmptyImageLocation,

    // ── Persistence ────────────────────────────────────────────────────────
    #[error("list services for application {app}: {source}")]
    ListServices { app: String, source: Box<BerthError> },

    #[error("get application {app}: {source}")]
    GetApplication { app: String, source: Box<BerthError> },

    #[error("application {name} does not exist")]
    ApplicationNotFound { name: String },

    #[error("saving service {name}: {source}")]
    SaveService { name: String, source: Box<BerthError> },

    /// The workload store failed.
    #[error("{reason}")]
    Store { reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("workload store is unavailable")]
    StoreLockError,

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A Dockerfile could not be read or parsed.
    #[error("parse Dockerfile {path}: {reason}")]
    BuildFile { path: PathBuf, reason: String },

    // ── Linkage ────────────────────────────────────────────────────────────
    #[error("add service {name} to application {app}: {source}")]
    AddServiceToApp {
        name: String,
        app: String,
        source: Box<BerthError>,
    },

    /// The application registry rejected a call.
    #[error("{reason}")]
    Deployer { reason: String },
}

impl ApplicationError {
    pub(crate) fn select_service_type(source: BerthError) -> Self {
        Self::SelectServiceType {
            source: Box::new(source),
        }
    }

    pub(crate) fn get_service_name(source: BerthError) -> Self {
        Self::GetServiceName {
            source: Box::new(source),
        }
    }

    pub(crate) fn select_build_file(source: BerthError) -> Self {
        Self::SelectBuildFile {
            source: Box::new(source),
        }
    }

    pub(crate) fn get_image_location(source: BerthError) -> Self {
        Self::GetImageLocation {
            source: Box::new(source),
        }
    }

    pub(crate) fn get_port(source: BerthError) -> Self {
        Self::GetPort {
            source: Box::new(source),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::SelectServiceType { .. }
            | Self::GetServiceName { .. }
            | Self::SelectBuildFile { .. }
            | Self::GetImageLocation { .. }
            | Self::Prompt { .. } => vec![
                "Interactive input failed".into(),
                "Pass the missing values as flags: --name, --svc-type, --dockerfile or --image"
                    .into(),
            ],
            Self::GetPort { .. } | Self::InvalidPort { .. } => vec![
                "Ports must be whole numbers between 1 and 65535".into(),
                "Pass the port explicitly with --port".into(),
            ],
            Self::EmptyImageLocation => {
                vec!["Provide an image reference such as nginx:latest".into()]
            }
            Self::GetApplication { app, .. } => vec![
                format!("Application '{}' could not be loaded", app),
                "Create it first: berth workspace init --app <name>".into(),
            ],
            Self::ApplicationNotFound { name } => vec![
                format!("No application named '{}' is registered", name),
                "Create it first: berth workspace init --app <name>".into(),
            ],
            Self::SaveService { .. } => vec![
                "The manifest was written but the service was not registered".into(),
                "Re-run the command; the manifest will be overwritten".into(),
            ],
            Self::AddServiceToApp { .. } => vec![
                "The service is registered but not linked to its application".into(),
                "Re-run the command to retry the link".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::StoreLockError => vec![
                "The workload store is locked".into(),
                "Try again in a moment".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SelectServiceType { .. }
            | Self::GetServiceName { .. }
            | Self::SelectBuildFile { .. }
            | Self::GetImageLocation { .. }
            | Self::Prompt { .. } => ErrorCategory::Interaction,
            Self::GetPort { .. } | Self::InvalidPort { .. } | Self::EmptyImageLocation => {
                ErrorCategory::Resolution
            }
            Self::ListServices { .. }
            | Self::GetApplication { .. }
            | Self::ApplicationNotFound { .. }
            | Self::SaveService { .. }
            | Self::Store { .. }
            | Self::StoreLockError
            | Self::FilesystemError { .. }
            | Self::BuildFile { .. } => ErrorCategory::Persistence,
            Self::AddServiceToApp { .. } | Self::Deployer { .. } => ErrorCategory::Linkage,
        }
    }
}
