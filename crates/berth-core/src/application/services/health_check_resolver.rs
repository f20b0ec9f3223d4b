//! Health check probing.

use std::path::Path;

use tracing::{debug, info};

use crate::{application::ports::BuildFileParser, domain::HealthCheckSpec};

/// Reads the health check a Dockerfile declares.
///
/// Never fails: the health check is optional, so a probe error is logged
/// and treated the same as "none declared".
pub struct HealthCheckResolver<'a> {
    parser: &'a dyn BuildFileParser,
}

impl<'a> HealthCheckResolver<'a> {
    pub fn new(parser: &'a dyn BuildFileParser) -> Self {
        Self { parser }
    }

    pub fn resolve(&self, dockerfile: Option<&Path>) -> Option<HealthCheckSpec> {
        let path = dockerfile?;

        match self.parser.health_check(path) {
            Ok(Some(spec)) => {
                debug!(command = ?spec.command, "Using health check from Dockerfile");
                Some(spec)
            }
            Ok(None) => {
                debug!(dockerfile = %path.display(), "No health check declared");
                None
            }
            Err(e) => {
                info!(
                    dockerfile = %path.display(),
                    error = %e,
                    "Could not read health check; continuing without one"
                );
                None
            }
        }
    }
}
