//! Berth Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers of the `berth`
//! service initializer, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            berth-cli (CLI)              │
//! │   (prompter, progress, flag parsing)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services           │
//! │  ServiceInitService: Validate → Ask →   │
//! │               Execute                   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Store, Deployer, Parser, Writer, ...)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     berth-adapters (Infrastructure)     │
//! │ (JsonFileStore, DockerfileParser, ...)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (ServiceType, Manifest, Workload, ...) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use berth_core::prelude::*;
//!
//! let service = ServiceInitService::new(collaborators, workspace_root);
//! let request = ServiceInitRequest::new("phonetool")
//!     .with_name("frontend")
//!     .with_service_type("Load Balanced Web Service");
//!
//! let validated = service.validate(&request)?;
//! let resolved = service.ask(validated)?;
//! let registration = service.execute(resolved)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, BuildFileChoice, BuildFileParser, BuildFilePrompts, BuildFileSelector,
        Collaborators, Deployer, Filesystem, ManifestWriter, ProgressOutcome, ProgressReporter,
        Prompter, ServiceInitService, TextValidator, WorkloadStore,
    };
    pub use crate::domain::{
        Application, DomainError, HealthCheckSpec, ImageSource, Manifest, Registration,
        ResolvedService, ServiceInitRequest, ServiceType, ValidatedRequest, Workload,
    };
    pub use crate::error::{BerthError, BerthResult, ErrorCategory};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
