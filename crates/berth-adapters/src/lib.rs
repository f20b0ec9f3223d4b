//! Infrastructure adapters for Berth.
//!
//! This crate implements the ports defined in `berth-core::application::ports`.
//! It contains all external dependencies and I/O operations except the
//! terminal-facing ones, which live in the CLI.

pub mod deployer;
pub mod dockerfile;
pub mod filesystem;
pub mod manifest;
pub mod selector;
pub mod store;
pub mod workspace;

// Re-export commonly used adapters
pub use deployer::RegistryDeployer;
pub use dockerfile::DockerfileParser;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use manifest::WorkspaceManifestWriter;
pub use selector::DockerfileSelector;
pub use store::{InMemoryStore, JsonFileStore};
pub use workspace::Workspace;
