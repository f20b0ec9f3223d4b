//! Ask phase: fill in whatever the request left out.

use std::path::Path;

use tracing::{debug, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{BuildFileParser, BuildFileSelector, Prompter},
        services::{
            health_check_resolver::HealthCheckResolver,
            image_source_resolver::ImageSourceResolver, port_resolver::PortResolver,
        },
    },
    domain::{DomainValidator, ResolvedService, ServiceType, ValidatedRequest},
    error::BerthResult,
};

pub const SERVICE_TYPE_PROMPT: &str = "Which service type best represents your service's architecture?";
pub const SERVICE_TYPE_HELP: &str = "A Load Balanced Web Service is an internet-facing service \
behind a shared load balancer. A Backend Service is reachable only from other services \
in the same application.";

/// Label used when asking for a service's name.
pub fn service_name_prompt(service_type: ServiceType) -> String {
    format!("What do you want to name this {service_type}?")
}

pub fn service_name_help(app_name: &str) -> String {
    format!("The name will uniquely identify this service within your app {app_name}.")
}

fn validate_name(raw: &str) -> Result<(), String> {
    DomainValidator::validate_service_name(raw.trim()).map_err(|e| e.to_string())
}

/// Runs the Ask phase in a fixed order: type, name, image source, port,
/// health check. The first failure aborts the phase.
pub struct InteractiveResolver<'a> {
    prompter: &'a dyn Prompter,
    selector: &'a dyn BuildFileSelector,
    parser: &'a dyn BuildFileParser,
}

impl<'a> InteractiveResolver<'a> {
    pub fn new(
        prompter: &'a dyn Prompter,
        selector: &'a dyn BuildFileSelector,
        parser: &'a dyn BuildFileParser,
    ) -> Self {
        Self {
            prompter,
            selector,
            parser,
        }
    }

    #[instrument(skip_all, fields(app = %request.app_name()))]
    pub fn resolve(
        &self,
        request: ValidatedRequest,
        search_root: &Path,
    ) -> BerthResult<ResolvedService> {
        let service_type = match request.service_type() {
            Some(t) => t,
            None => self.ask_service_type()?,
        };

        let name = match request.name() {
            Some(n) => n.to_string(),
            None => self.ask_service_name(service_type, request.app_name())?,
        };

        let source = ImageSourceResolver::new(self.prompter, self.selector).resolve(
            &name,
            request.source(),
            search_root,
        )?;

        let port = PortResolver::new(self.prompter, self.parser).resolve(
            service_type,
            request.port(),
            source.dockerfile(),
        )?;

        let health_check = HealthCheckResolver::new(self.parser).resolve(source.dockerfile());

        debug!(
            name = %name,
            service_type = %service_type,
            %source,
            ?port,
            has_health_check = health_check.is_some(),
            "Service resolved"
        );

        Ok(ResolvedService {
            app_name: request.app_name().to_string(),
            name,
            service_type,
            source,
            port,
            health_check,
        })
    }

    fn ask_service_type(&self) -> BerthResult<ServiceType> {
        let choice = self
            .prompter
            .select_one(SERVICE_TYPE_PROMPT, SERVICE_TYPE_HELP, &ServiceType::options())
            .map_err(ApplicationError::select_service_type)?;

        DomainValidator::parse_service_type(&choice)
            .map_err(|e| ApplicationError::select_service_type(e.into()).into())
    }

    fn ask_service_name(&self, service_type: ServiceType, app_name: &str) -> BerthResult<String> {
        let name = self
            .prompter
            .get_text(
                &service_name_prompt(service_type),
                &service_name_help(app_name),
                "",
                Some(validate_name),
            )
            .map_err(ApplicationError::get_service_name)?;

        let name = name.trim();
        DomainValidator::validate_service_name(name)
            .map_err(|e| ApplicationError::get_service_name(e.into()))?;
        Ok(name.to_string())
    }
}
