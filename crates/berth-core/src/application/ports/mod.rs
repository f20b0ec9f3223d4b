//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `berth-adapters` and the CLI
//! implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: Existence checks
//!   - `Prompter`, `BuildFileSelector`, `ProgressReporter`: Terminal interaction
//!   - `BuildFileParser`: Dockerfile probing
//!   - `WorkloadStore`, `Deployer`, `ManifestWriter`: Registration
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    BuildFileChoice, BuildFileParser, BuildFilePrompts, BuildFileSelector, Deployer, Filesystem,
    ManifestWriter, ProgressOutcome, ProgressReporter, Prompter, TextValidator, WorkloadStore,
};

#[cfg(test)]
pub use output::{
    MockBuildFileParser, MockBuildFileSelector, MockDeployer, MockFilesystem, MockManifestWriter,
    MockProgressReporter, MockPrompter, MockWorkloadStore,
};
