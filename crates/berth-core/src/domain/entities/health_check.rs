//! Container health check as declared by a Dockerfile.

use std::time::Duration;

use serde::Serializer;

/// A container health check probed from a build description.
///
/// Only ever constructed from what the Dockerfile declares; there is no
/// synthetic default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthCheckSpec {
    pub interval: Duration,
    pub retries: u32,
    pub timeout: Duration,
    pub start_period: Duration,
    /// Docker form: `["CMD", arg...]` or `["CMD-SHELL", "<command>"]`.
    pub command: Vec<String>,
}

/// Render a duration the way Docker and the manifest expect it: `30s`,
/// `1m30s`, `500ms`, `0s`.
pub fn format_duration(d: Duration) -> String {
    if d.is_zero() {
        return "0s".into();
    }

    let total_secs = d.as_secs();
    let (hours, minutes, seconds) = (total_secs / 3600, (total_secs % 3600) / 60, total_secs % 60);
    let millis = d.subsec_millis();

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    if seconds > 0 {
        out.push_str(&format!("{seconds}s"));
    }
    if millis > 0 {
        out.push_str(&format!("{millis}ms"));
    }
    out
}

pub(crate) fn serialize_duration<S>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_duration(*d))
}
