pub mod health_check;
pub mod manifest;
pub mod request;
pub mod workload;

pub use crate::domain::DomainError;
pub use manifest::Manifest;
pub use request::{ResolvedService, ServiceInitRequest, ValidatedRequest};
pub use workload::{Application, Workload};
