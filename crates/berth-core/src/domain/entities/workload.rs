//! Registry records: `Workload` and `Application`.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ServiceType;

/// The minimal registry record identifying a service.
///
/// Created once per successful registration and never mutated by the init
/// workflow afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Workload {
    pub name: String,
    #[serde(rename = "app")]
    pub app_name: String,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
}

impl Workload {
    pub fn new(
        name: impl Into<String>,
        app_name: impl Into<String>,
        service_type: ServiceType,
    ) -> Self {
        Self {
            name: name.into(),
            app_name: app_name.into(),
            service_type,
        }
    }
}

/// An application that services are registered into.
///
/// Fetched, never created, by the init workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub name: String,
    #[serde(rename = "account")]
    pub account_id: String,
}

impl Application {
    pub fn new(name: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            account_id: account_id.into(),
        }
    }
}
