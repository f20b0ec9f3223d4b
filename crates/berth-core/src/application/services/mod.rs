//! Application services - orchestrate use cases.
//!
//! The init-service workflow is split into small components, one per
//! decision, each borrowing only the ports it needs. `ServiceInitService`
//! owns the adapters and wires them into the components per phase.

pub mod health_check_resolver;
pub mod image_source_resolver;
pub mod interactive_resolver;
pub mod manifest_builder;
pub mod port_resolver;
pub mod registration;
pub mod service_init;
pub mod validator;

pub use health_check_resolver::HealthCheckResolver;
pub use image_source_resolver::{ImageSourceResolver, build_file_prompts};
pub use interactive_resolver::InteractiveResolver;
pub use manifest_builder::ManifestBuilder;
pub use port_resolver::{PortResolver, parse_port, validate_port};
pub use registration::RegistrationOrchestrator;
pub use service_init::{Collaborators, ServiceInitService};
pub use validator::RequestValidator;
