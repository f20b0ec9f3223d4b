// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Berth.
//!
//! This module contains pure service-description logic with no I/O. Prompts,
//! Dockerfile probing, persistence and registry calls are all handled via
//! ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No tracing**: Observability belongs to the application and CLI layers
//! - **Value entities**: All domain objects are Clone + PartialEq
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    health_check::{HealthCheckSpec, format_duration},
    manifest::{
        BackendServiceManifest, BuildConfig, ContainerHealthCheck, HttpConfig, ImageConfig,
        LoadBalancedWebServiceManifest, Manifest,
    },
    request::{ImageSource, Registration, ResolvedService, ServiceInitRequest, ValidatedRequest},
    workload::{Application, Workload},
};

pub use error::{DomainError, NAME_FORMAT_REASON};

pub use value_objects::ServiceType;

pub use validation::DomainValidator;
