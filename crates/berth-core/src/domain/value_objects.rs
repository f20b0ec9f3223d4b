//! Domain value objects: ServiceType.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! This file's only job is to define the types, their string
//! representations, and their `FromStr` parsers.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here and to [`ServiceType::ALL`]
//! 2. Add the `as_str`, `slug` and `FromStr` arms here
//! 3. Add a manifest variant in `entities/manifest.rs`
//! 4. Done. The prompts and error messages pick it up from `ALL`

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ServiceType ───────────────────────────────────────────────────────────────

/// The architecture of a service, which decides the shape of its manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    /// Internet-facing service behind the application's shared load balancer.
    #[serde(rename = "Load Balanced Web Service")]
    LoadBalancedWebService,
    /// Service reachable only from other services in the application.
    #[serde(rename = "Backend Service")]
    BackendService,
}

impl ServiceType {
    /// The closed set, in prompt order.
    pub const ALL: [ServiceType; 2] = [Self::LoadBalancedWebService, Self::BackendService];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LoadBalancedWebService => "Load Balanced Web Service",
            Self::BackendService => "Backend Service",
        }
    }

    /// Short flag-friendly form.
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::LoadBalancedWebService => "lb-web-svc",
            Self::BackendService => "backend-svc",
        }
    }

    /// Whether a listening port must be resolved before the manifest can be
    /// written. Backend services may legitimately expose nothing.
    pub const fn requires_port(self) -> bool {
        matches!(self, Self::LoadBalancedWebService)
    }

    /// Display names of every variant, for single-choice prompts.
    pub fn options() -> Vec<String> {
        Self::ALL.iter().map(|t| t.as_str().to_string()).collect()
    }

    /// `"Load Balanced Web Service", "Backend Service"`
    pub fn quoted_list() -> String {
        Self::ALL
            .iter()
            .map(|t| format!("\"{}\"", t.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "load balanced web service" | "load-balanced-web-service" | "lb-web-svc" => {
                Ok(Self::LoadBalancedWebService)
            }
            "backend service" | "backend-service" | "backend-svc" => Ok(Self::BackendService),
            _ => Err(DomainError::InvalidServiceType {
                value: s.to_string(),
            }),
        }
    }
}
