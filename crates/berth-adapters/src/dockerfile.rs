//! Dockerfile probing: `EXPOSE` ports and the `HEALTHCHECK` instruction.
//!
//! Only the two instructions the init workflow needs are understood. The
//! file is split into logical lines first (comments dropped, `\`
//! continuations joined), then matched instruction by instruction.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use berth_core::{
    application::{ApplicationError, ports::BuildFileParser},
    domain::HealthCheckSpec,
    error::BerthResult,
};

static INSTRUCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(EXPOSE|HEALTHCHECK)\s+(.*?)\s*$").expect("valid regex")
});

static PORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)(?:-(\d+))?(?:/(tcp|udp))?$").expect("valid regex"));

/// Docker's defaults for options a `HEALTHCHECK` leaves out.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_START_PERIOD: Duration = Duration::ZERO;
pub const DEFAULT_RETRIES: u32 = 3;

/// Reasons a Dockerfile could not be understood.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DockerfileError {
    #[error("EXPOSE value {value} is not a valid port")]
    InvalidPort { value: String },

    #[error("HEALTHCHECK {flag} value {value} is not a valid duration")]
    InvalidDuration { flag: String, value: String },

    #[error("HEALTHCHECK --retries value {value} is not a whole number")]
    InvalidRetries { value: String },

    #[error("HEALTHCHECK flag {flag} is not supported")]
    UnknownFlag { flag: String },

    #[error("HEALTHCHECK must be NONE or CMD followed by a command")]
    MissingCommand,

    #[error("HEALTHCHECK exec form is not a JSON string array: {reason}")]
    InvalidExecForm { reason: String },
}

/// Reads Dockerfiles from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DockerfileParser;

impl DockerfileParser {
    pub fn new() -> Self {
        Self
    }

    fn read(&self, path: &Path) -> BerthResult<String> {
        std::fs::read_to_string(path).map_err(|e| {
            ApplicationError::BuildFile {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

fn to_berth(path: &Path) -> impl Fn(DockerfileError) -> berth_core::error::BerthError + '_ {
    move |e| {
        ApplicationError::BuildFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    }
}

impl BuildFileParser for DockerfileParser {
    fn exposed_ports(&self, dockerfile: &Path) -> BerthResult<Vec<u16>> {
        let content = self.read(dockerfile)?;
        let ports = parse_exposed_ports(&content).map_err(to_berth(dockerfile))?;
        debug!(dockerfile = %dockerfile.display(), ?ports, "Parsed EXPOSE");
        Ok(ports)
    }

    fn health_check(&self, dockerfile: &Path) -> BerthResult<Option<HealthCheckSpec>> {
        let content = self.read(dockerfile)?;
        parse_health_check(&content).map_err(to_berth(dockerfile))
    }
}

// ── Parsing ──────────────────────────────────────────────────────────────────

/// Split into logical lines: comments and blanks dropped, continuations joined.
fn logical_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for raw in content.lines() {
        let trimmed = raw.trim();
        if trimmed.starts_with('#') {
            continue;
        }
        if current.is_empty() && trimmed.is_empty() {
            continue;
        }

        match trimmed.strip_suffix('\\') {
            Some(head) => {
                current.push_str(head.trim_end());
                current.push(' ');
            }
            None => {
                current.push_str(trimmed);
                lines.push(std::mem::take(&mut current));
            }
        }
    }
    if !current.trim().is_empty() {
        lines.push(current);
    }
    lines
}

/// The `(instruction, arguments)` pairs for the instructions we understand.
fn instructions(content: &str) -> impl Iterator<Item = (String, String)> {
    logical_lines(content).into_iter().filter_map(|line| {
        INSTRUCTION
            .captures(&line)
            .map(|caps| (caps[1].to_ascii_uppercase(), caps[2].to_string()))
    })
}

/// Every port declared with `EXPOSE`, in order, without duplicates.
/// A range such as `8000-8010` declares each port in it.
pub fn parse_exposed_ports(content: &str) -> Result<Vec<u16>, DockerfileError> {
    let mut ports = Vec::new();
    let mut seen = HashSet::new();

    for (instruction, args) in instructions(content) {
        if instruction != "EXPOSE" {
            continue;
        }
        for token in args.split_whitespace() {
            let (first, last) = parse_port_spec(token).ok_or_else(|| {
                DockerfileError::InvalidPort {
                    value: token.to_string(),
                }
            })?;
            for port in first..=last {
                if seen.insert(port) {
                    ports.push(port);
                }
            }
        }
    }

    Ok(ports)
}

/// `80`, `80/tcp` or `8000-8010/udp` as an inclusive range of non-zero ports.
fn parse_port_spec(token: &str) -> Option<(u16, u16)> {
    let caps = PORT.captures(token)?;
    let first = caps[1].parse::<u16>().ok().filter(|p| *p != 0)?;
    let last = match caps.get(2) {
        Some(end) => end.as_str().parse::<u16>().ok()?,
        None => first,
    };
    (first <= last).then_some((first, last))
}

/// The effective `HEALTHCHECK`. Like Docker, the last one wins and
/// `HEALTHCHECK NONE` disables it.
pub fn parse_health_check(content: &str) -> Result<Option<HealthCheckSpec>, DockerfileError> {
    let last = instructions(content)
        .filter(|(instruction, _)| instruction == "HEALTHCHECK")
        .last();

    match last {
        Some((_, args)) => parse_health_check_args(&args),
        None => Ok(None),
    }
}

fn parse_health_check_args(args: &str) -> Result<Option<HealthCheckSpec>, DockerfileError> {
    if args.trim().eq_ignore_ascii_case("NONE") {
        return Ok(None);
    }

    let mut spec = HealthCheckSpec {
        interval: DEFAULT_INTERVAL,
        retries: DEFAULT_RETRIES,
        timeout: DEFAULT_TIMEOUT,
        start_period: DEFAULT_START_PERIOD,
        command: Vec::new(),
    };

    let mut rest = args.trim_start();
    while let Some(flag) = rest.strip_prefix("--") {
        let end = flag.find(char::is_whitespace).unwrap_or(flag.len());
        let (option, tail) = flag.split_at(end);
        rest = tail.trim_start();

        let (name, value) = option.split_once('=').unwrap_or((option, ""));
        match name {
            "interval" => spec.interval = flag_duration(name, value)?,
            "timeout" => spec.timeout = flag_duration(name, value)?,
            "start-period" => spec.start_period = flag_duration(name, value)?,
            "retries" => {
                spec.retries = value.parse().map_err(|_| DockerfileError::InvalidRetries {
                    value: value.to_string(),
                })?
            }
            // Accepted by newer Docker releases; not carried into manifests.
            "start-interval" => {
                flag_duration(name, value)?;
            }
            _ => {
                return Err(DockerfileError::UnknownFlag {
                    flag: format!("--{name}"),
                });
            }
        }
    }

    let (keyword, command) = rest
        .split_once(char::is_whitespace)
        .ok_or(DockerfileError::MissingCommand)?;
    if !keyword.eq_ignore_ascii_case("CMD") {
        return Err(DockerfileError::MissingCommand);
    }

    let command = command.trim();
    if command.is_empty() {
        return Err(DockerfileError::MissingCommand);
    }

    spec.command = if command.starts_with('[') {
        let args: Vec<String> =
            serde_json::from_str(command).map_err(|e| DockerfileError::InvalidExecForm {
                reason: e.to_string(),
            })?;
        if args.is_empty() {
            return Err(DockerfileError::MissingCommand);
        }
        std::iter::once("CMD".to_string()).chain(args).collect()
    } else {
        vec!["CMD-SHELL".to_string(), command.to_string()]
    };

    Ok(Some(spec))
}

fn flag_duration(flag: &str, value: &str) -> Result<Duration, DockerfileError> {
    parse_duration(value).ok_or_else(|| DockerfileError::InvalidDuration {
        flag: format!("--{flag}"),
        value: value.to_string(),
    })
}

/// Parse a duration such as `30s`, `1m30s`, `500ms` or `1h`.
///
/// Every number needs a unit; `0` alone is accepted as zero.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if s == "0" {
        return Some(Duration::ZERO);
    }

    let mut total = Duration::ZERO;
    let mut rest = s;
    while !rest.is_empty() {
        let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        if digits == 0 {
            return None;
        }
        let value: u64 = rest[..digits].parse().ok()?;
        rest = &rest[digits..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(rest.len());
        let unit = &rest[..unit_len];
        rest = &rest[unit_len..];

        let part = match unit {
            "h" => Duration::from_secs(value.checked_mul(3600)?),
            "m" => Duration::from_secs(value.checked_mul(60)?),
            "s" => Duration::from_secs(value),
            "ms" => Duration::from_millis(value),
            "us" | "µs" => Duration::from_micros(value),
            "ns" => Duration::from_nanos(value),
            _ => return None,
        };
        total = total.checked_add(part)?;
    }
    Some(total)
}
