//! Application layer for Berth.
//!
//! This layer contains:
//! - **Services**: the init-service workflow (Validate, Ask, Execute)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer; naming and shape
//! rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{Collaborators, ServiceInitService};

// Re-export port traits (for adapter implementation)
pub use ports::{
    BuildFileChoice, BuildFileParser, BuildFilePrompts, BuildFileSelector, Deployer, Filesystem,
    ManifestWriter, ProgressOutcome, ProgressReporter, Prompter, TextValidator, WorkloadStore,
};

pub use error::ApplicationError;
