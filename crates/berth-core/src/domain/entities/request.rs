//! The init-service request and its phase states.
//!
//! A request moves through three states, each produced only by the previous
//! phase succeeding:
//!
//! ```text
//! ServiceInitRequest ──validate──▶ ValidatedRequest ──ask──▶ ResolvedService ──execute──▶ Registration
//! ```
//!
//! Raw user input lives in [`ServiceInitRequest`]; empty strings and a zero
//! port are treated exactly like absent values.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::{
    entities::{health_check::HealthCheckSpec, workload::Workload},
    value_objects::ServiceType,
};

// ── Unvalidated ───────────────────────────────────────────────────────────────

/// Partially-specified description of a service, as supplied by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceInitRequest {
    pub service_type: Option<String>,
    pub name: Option<String>,
    pub dockerfile: Option<PathBuf>,
    pub image: Option<String>,
    /// `0` means unset.
    pub port: Option<u16>,
    pub app_name: String,
}

impl ServiceInitRequest {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            ..Self::default()
        }
    }

    pub fn with_service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = Some(service_type.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_dockerfile(mut self, path: impl Into<PathBuf>) -> Self {
        self.dockerfile = Some(path.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn service_type_input(&self) -> Option<&str> {
        non_empty(self.service_type.as_deref())
    }

    pub fn name_input(&self) -> Option<&str> {
        non_empty(self.name.as_deref())
    }

    pub fn image_input(&self) -> Option<&str> {
        non_empty(self.image.as_deref())
    }

    pub fn dockerfile_input(&self) -> Option<&Path> {
        self.dockerfile
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    pub fn port_input(&self) -> Option<u16> {
        self.port.filter(|p| *p != 0)
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

// ── Validated ─────────────────────────────────────────────────────────────────

/// A request whose supplied fields all passed validation.
///
/// Only the Validate phase constructs this; fields that were not supplied
/// are still `None` and get resolved by the Ask phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    service_type: Option<ServiceType>,
    name: Option<String>,
    dockerfile: Option<PathBuf>,
    image: Option<String>,
    port: Option<u16>,
    app_name: String,
}

impl ValidatedRequest {
    pub(crate) fn new(
        service_type: Option<ServiceType>,
        name: Option<String>,
        dockerfile: Option<PathBuf>,
        image: Option<String>,
        port: Option<u16>,
        app_name: String,
    ) -> Self {
        Self {
            service_type,
            name,
            dockerfile,
            image,
            port,
            app_name,
        }
    }

    pub fn service_type(&self) -> Option<ServiceType> {
        self.service_type
    }
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    pub fn dockerfile(&self) -> Option<&Path> {
        self.dockerfile.as_deref()
    }
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
    pub fn port(&self) -> Option<u16> {
        self.port
    }
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// The image source supplied by flags, if any.
    pub fn source(&self) -> Option<ImageSource> {
        match (&self.dockerfile, &self.image) {
            (Some(path), _) => Some(ImageSource::Dockerfile(path.clone())),
            (None, Some(image)) => Some(ImageSource::Image(image.clone())),
            (None, None) => None,
        }
    }
}

// ── Resolved ──────────────────────────────────────────────────────────────────

/// Where the service's container image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Build from this Dockerfile.
    Dockerfile(PathBuf),
    /// Pull an existing image from this location.
    Image(String),
}

impl ImageSource {
    pub fn dockerfile(&self) -> Option<&Path> {
        match self {
            Self::Dockerfile(path) => Some(path),
            Self::Image(_) => None,
        }
    }

    pub fn image(&self) -> Option<&str> {
        match self {
            Self::Dockerfile(_) => None,
            Self::Image(location) => Some(location),
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dockerfile(path) => write!(f, "dockerfile {}", path.display()),
            Self::Image(location) => write!(f, "image {location}"),
        }
    }
}

/// A fully-resolved service, ready to be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedService {
    pub app_name: String,
    pub name: String,
    pub service_type: ServiceType,
    pub source: ImageSource,
    pub port: Option<u16>,
    pub health_check: Option<HealthCheckSpec>,
}

impl ResolvedService {
    /// The registry record this service becomes.
    pub fn workload(&self) -> Workload {
        Workload::new(&self.name, &self.app_name, self.service_type)
    }
}

// ── Committed ─────────────────────────────────────────────────────────────────

/// Outcome of a successful Execute phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub manifest_path: PathBuf,
    pub workload: Workload,
}
