//! Typed service manifests.
//!
//! A [`Manifest`] is the declarative deployment description of one service.
//! Its shape depends on the [`ServiceType`]: every variant carries the
//! workload identity and an image block; load-balanced web services also
//! claim a routing path on the application's shared ingress.
//!
//! Rendering to bytes is an adapter concern; this module only derives
//! `Serialize` with the field names the manifest file uses.

use std::path::Path;
use std::time::Duration;

use serde::Serialize;

use crate::domain::{
    entities::{
        health_check::{HealthCheckSpec, serialize_duration},
        request::ImageSource,
    },
    error::DomainError,
    value_objects::ServiceType,
};

// ── Image block ───────────────────────────────────────────────────────────────

/// Build instructions for an image built from source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildConfig {
    /// Directory sent to the builder, relative to the workspace root.
    pub context: String,
    /// Dockerfile path, relative to the workspace root.
    pub dockerfile: String,
}

impl BuildConfig {
    pub fn from_dockerfile(dockerfile: &Path) -> Self {
        let context = dockerfile
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| ".".to_string());

        Self {
            context,
            dockerfile: dockerfile.to_string_lossy().into_owned(),
        }
    }
}

/// Health check block as it appears in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerHealthCheck {
    pub command: Vec<String>,
    #[serde(serialize_with = "serialize_duration")]
    pub interval: Duration,
    pub retries: u32,
    #[serde(serialize_with = "serialize_duration")]
    pub timeout: Duration,
    #[serde(serialize_with = "serialize_duration")]
    pub start_period: Duration,
}

impl From<HealthCheckSpec> for ContainerHealthCheck {
    fn from(spec: HealthCheckSpec) -> Self {
        Self {
            command: spec.command,
            interval: spec.interval,
            retries: spec.retries,
            timeout: spec.timeout,
            start_period: spec.start_period,
        }
    }
}

/// Image configuration: either `build` or `location`, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(rename = "healthcheck", skip_serializing_if = "Option::is_none")]
    pub health_check: Option<ContainerHealthCheck>,
}

impl ImageConfig {
    /// Build the image block for a source. `dockerfile` is the path as it
    /// should appear in the manifest (already made workspace-relative).
    pub fn new(
        source: &ImageSource,
        port: Option<u16>,
        health_check: Option<HealthCheckSpec>,
    ) -> Self {
        let (build, location) = match source {
            ImageSource::Dockerfile(path) => (Some(BuildConfig::from_dockerfile(path)), None),
            ImageSource::Image(location) => (None, Some(location.clone())),
        };

        Self {
            build,
            location,
            port,
            health_check: health_check.map(ContainerHealthCheck::from),
        }
    }
}

// ── Variants ──────────────────────────────────────────────────────────────────

/// Routing rule on the shared ingress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpConfig {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadBalancedWebServiceManifest {
    pub name: String,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub image: ImageConfig,
    pub http: HttpConfig,
}

impl LoadBalancedWebServiceManifest {
    pub fn new(name: impl Into<String>, image: ImageConfig, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            service_type: ServiceType::LoadBalancedWebService,
            image,
            http: HttpConfig { path: path.into() },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendServiceManifest {
    pub name: String,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub image: ImageConfig,
}

impl BackendServiceManifest {
    pub fn new(name: impl Into<String>, image: ImageConfig) -> Self {
        Self {
            name: name.into(),
            service_type: ServiceType::BackendService,
            image,
        }
    }
}

/// A service manifest, keyed by service type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Manifest {
    LoadBalancedWebService(LoadBalancedWebServiceManifest),
    BackendService(BackendServiceManifest),
}

impl Manifest {
    pub fn name(&self) -> &str {
        match self {
            Self::LoadBalancedWebService(m) => &m.name,
            Self::BackendService(m) => &m.name,
        }
    }

    pub fn service_type(&self) -> ServiceType {
        match self {
            Self::LoadBalancedWebService(_) => ServiceType::LoadBalancedWebService,
            Self::BackendService(_) => ServiceType::BackendService,
        }
    }

    pub fn image(&self) -> &ImageConfig {
        match self {
            Self::LoadBalancedWebService(m) => &m.image,
            Self::BackendService(m) => &m.image,
        }
    }

    /// Routing path; `None` for service types that are not behind the
    /// shared ingress.
    pub fn routing_path(&self) -> Option<&str> {
        match self {
            Self::LoadBalancedWebService(m) => Some(&m.http.path),
            Self::BackendService(_) => None,
        }
    }

    /// Check the cross-field invariants of the manifest.
    pub fn validate(&self) -> Result<(), DomainError> {
        let image = self.image();
        let invalid = |reason: &str| DomainError::InvalidManifest {
            name: self.name().to_string(),
            reason: reason.to_string(),
        };

        match (&image.build, &image.location) {
            (Some(_), Some(_)) => return Err(invalid("image has both build and location")),
            (None, None) => return Err(invalid("image has neither build nor location")),
            _ => {}
        }
        if image.port == Some(0) {
            return Err(invalid("port must be between 1 and 65535"));
        }
        if let Some(path) = self.routing_path() {
            if path.is_empty() {
                return Err(invalid("routing path cannot be empty"));
            }
        }
        Ok(())
    }
}
