//! Container port resolution.
//!
//! Precedence, highest first:
//! 1. an explicit non-zero port from the request;
//! 2. the single port a resolved Dockerfile exposes;
//! 3. a prompt (load-balanced services only).

use std::path::Path;

use tracing::debug;

use crate::{
    application::{
        ApplicationError,
        ports::{BuildFileParser, Prompter},
    },
    domain::ServiceType,
    error::BerthResult,
};

pub const PORT_PROMPT: &str = "Which port do you want customer traffic sent to?";
pub const PORT_HELP: &str = "The port your service listens on. \
The load balancer forwards incoming traffic to this port.";
pub const DEFAULT_PORT: &str = "80";

/// Resolves the port a service's container listens on.
pub struct PortResolver<'a> {
    prompter: &'a dyn Prompter,
    parser: &'a dyn BuildFileParser,
}

impl<'a> PortResolver<'a> {
    pub fn new(prompter: &'a dyn Prompter, parser: &'a dyn BuildFileParser) -> Self {
        Self { prompter, parser }
    }

    /// Returns `None` only for services that do not need a port and whose
    /// Dockerfile (if any) did not expose exactly one.
    pub fn resolve(
        &self,
        service_type: ServiceType,
        explicit: Option<u16>,
        dockerfile: Option<&Path>,
    ) -> BerthResult<Option<u16>> {
        if let Some(port) = explicit.filter(|p| *p != 0) {
            debug!(port, "Using port from flags");
            return Ok(Some(port));
        }

        if let Some(port) = dockerfile.and_then(|path| self.probe(path)) {
            debug!(port, "Using port exposed by Dockerfile");
            return Ok(Some(port));
        }

        if !service_type.requires_port() {
            return Ok(None);
        }

        let answer = self
            .prompter
            .get_text(PORT_PROMPT, PORT_HELP, DEFAULT_PORT, Some(validate_port))
            .map_err(ApplicationError::get_port)?;

        let port = parse_port(&answer).map_err(|e| ApplicationError::get_port(e.into()))?;
        Ok(Some(port))
    }

    /// A single exposed port, if the Dockerfile declares exactly one.
    fn probe(&self, dockerfile: &Path) -> Option<u16> {
        match self.parser.exposed_ports(dockerfile) {
            Ok(ports) if ports.len() == 1 => ports.first().copied().filter(|p| *p != 0),
            Ok(ports) => {
                debug!(
                    count = ports.len(),
                    "Dockerfile does not expose exactly one port"
                );
                None
            }
            Err(e) => {
                debug!(error = %e, "Could not read exposed ports");
                None
            }
        }
    }
}

/// Parse a port answer; the valid range is 1..=65535.
pub fn parse_port(raw: &str) -> Result<u16, ApplicationError> {
    let trimmed = raw.trim();
    let invalid = |reason: &str| ApplicationError::InvalidPort {
        value: trimmed.to_string(),
        reason: reason.to_string(),
    };

    let value: u32 = trimmed
        .parse()
        .map_err(|_| invalid("must be a whole number"))?;

    match u16::try_from(value) {
        Ok(0) | Err(_) => Err(invalid("must be between 1 and 65535")),
        Ok(port) => Ok(port),
    }
}

/// Prompt-side check, run before an answer is submitted.
pub fn validate_port(raw: &str) -> Result<(), String> {
    parse_port(raw).map(|_| ()).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockBuildFileParser, MockPrompter};
    use crate::error::BerthError;

    fn prompt_never() -> MockPrompter {
        let mut p = MockPrompter::new();
        p.expect_get_text().never();
        p
    }

    fn probe_never() -> MockBuildFileParser {
        let mut p = MockBuildFileParser::new();
        p.expect_exposed_ports().never();
        p
    }

    fn probe_returning(ports: Vec<u16>) -> MockBuildFileParser {
        let mut p = MockBuildFileParser::new();
        p.expect_exposed_ports()
            .times(1)
            .returning(move |_| Ok(ports.clone()));
        p
    }

    fn probe_failing() -> MockBuildFileParser {
        let mut p = MockBuildFileParser::new();
        p.expect_exposed_ports().times(1).returning(|_| {
            Err(ApplicationError::BuildFile {
                path: "frontend/Dockerfile".into(),
                reason: "no expose".into(),
            }
            .into())
        });
        p
    }

    fn prompt_answering(answer: Result<&'static str, &'static str>) -> MockPrompter {
        let mut p = MockPrompter::new();
        p.expect_get_text()
            .withf(|message, _, default, validator| {
                message == PORT_PROMPT && default == "80" && validator.is_some()
            })
            .times(1)
            .returning(move |_, _, _, _| match answer {
                Ok(text) => Ok(text.to_string()),
                Err(reason) => Err(ApplicationError::Prompt {
                    reason: reason.into(),
                }
                .into()),
            });
        p
    }

    const DOCKERFILE: &str = "frontend/Dockerfile";

    #[test]
    fn explicit_port_wins_without_probing() {
        let (prompter, parser) = (prompt_never(), probe_never());
        let port = PortResolver::new(&prompter, &parser)
            .resolve(
                ServiceType::LoadBalancedWebService,
                Some(80),
                Some(Path::new(DOCKERFILE)),
            )
            .unwrap();
        assert_eq!(port, Some(80));
    }

    #[test]
    fn single_exposed_port_is_adopted_silently() {
        let (prompter, parser) = (prompt_never(), probe_returning(vec![8080]));
        let port = PortResolver::new(&prompter, &parser)
            .resolve(
                ServiceType::LoadBalancedWebService,
                None,
                Some(Path::new(DOCKERFILE)),
            )
            .unwrap();
        assert_eq!(port, Some(8080));
    }

    #[test]
    fn multiple_exposed_ports_fall_through_to_prompt() {
        let prompter = prompt_answering(Ok("3000"));
        let parser = probe_returning(vec![80, 443]);
        let port = PortResolver::new(&prompter, &parser)
            .resolve(
                ServiceType::LoadBalancedWebService,
                None,
                Some(Path::new(DOCKERFILE)),
            )
            .unwrap();
        assert_eq!(port, Some(3000));
    }

    #[test]
    fn probe_error_falls_through_to_prompt() {
        let prompter = prompt_answering(Ok("80"));
        let parser = probe_failing();
        let port = PortResolver::new(&prompter, &parser)
            .resolve(
                ServiceType::LoadBalancedWebService,
                Some(0),
                Some(Path::new(DOCKERFILE)),
            )
            .unwrap();
        assert_eq!(port, Some(80));
    }

    #[test]
    fn image_source_prompts_without_probing() {
        let prompter = prompt_answering(Ok("80"));
        let parser = probe_never();
        let port = PortResolver::new(&prompter, &parser)
            .resolve(ServiceType::LoadBalancedWebService, None, None)
            .unwrap();
        assert_eq!(port, Some(80));
    }

    #[test]
    fn backend_service_is_never_prompted() {
        let (prompter, parser) = (prompt_never(), probe_failing());
        let port = PortResolver::new(&prompter, &parser)
            .resolve(
                ServiceType::BackendService,
                None,
                Some(Path::new(DOCKERFILE)),
            )
            .unwrap();
        assert_eq!(port, None);
    }

    #[test]
    fn backend_service_adopts_single_exposed_port() {
        let (prompter, parser) = (prompt_never(), probe_returning(vec![9000]));
        let port = PortResolver::new(&prompter, &parser)
            .resolve(
                ServiceType::BackendService,
                None,
                Some(Path::new(DOCKERFILE)),
            )
            .unwrap();
        assert_eq!(port, Some(9000));
    }

    #[test]
    fn prompt_failure_is_prefixed() {
        let prompter = prompt_answering(Err("some error"));
        let parser = probe_failing();
        let err = PortResolver::new(&prompter, &parser)
            .resolve(
                ServiceType::LoadBalancedWebService,
                None,
                Some(Path::new(DOCKERFILE)),
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "get port: some error");
    }

    #[test]
    fn out_of_range_answer_is_rejected() {
        let prompter = prompt_answering(Ok("100000"));
        let parser = probe_never();
        let err = PortResolver::new(&prompter, &parser)
            .resolve(ServiceType::LoadBalancedWebService, None, None)
            .unwrap_err();
        assert!(matches!(
            err,
            BerthError::Application(ApplicationError::GetPort { .. })
        ));
        assert_eq!(
            err.to_string(),
            "get port: port 100000 is invalid: must be between 1 and 65535"
        );
    }

    #[test]
    fn zero_answer_is_rejected() {
        let prompter = prompt_answering(Ok("0"));
        let parser = probe_never();
        let err = PortResolver::new(&prompter, &parser)
            .resolve(ServiceType::LoadBalancedWebService, None, None)
            .unwrap_err();
        assert!(err.to_string().starts_with("get port: port 0 is invalid"));
    }

    #[test]
    fn parse_port_bounds() {
        assert_eq!(parse_port("1").unwrap(), 1);
        assert_eq!(parse_port(" 65535 ").unwrap(), 65535);
        assert!(parse_port("65536").is_err());
        assert!(parse_port("http").is_err());
        assert!(parse_port("-1").is_err());
    }

    #[test]
    fn validator_reports_reason() {
        assert!(validate_port("8080").is_ok());
        assert_eq!(
            validate_port("abc").unwrap_err(),
            "port abc is invalid: must be a whole number"
        );
    }
}
