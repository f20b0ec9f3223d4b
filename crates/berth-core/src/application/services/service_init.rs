//! Service init - main application orchestrator.
//!
//! This service coordinates the init-service workflow:
//! 1. Validate the raw request
//! 2. Ask for whatever is missing
//! 3. Execute: write the manifest and register the service
//!
//! Each phase consumes the previous phase's output, so a phase can only run
//! after the one before it succeeded.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::{
    application::{
        ports::{
            BuildFileParser, BuildFileSelector, Deployer, Filesystem, ManifestWriter,
            ProgressReporter, Prompter, WorkloadStore,
        },
        services::{
            interactive_resolver::InteractiveResolver, registration::RegistrationOrchestrator,
            validator::RequestValidator,
        },
    },
    domain::{Registration, ResolvedService, ServiceInitRequest, ValidatedRequest},
    error::BerthResult,
};

/// Adapters the workflow is wired to.
pub struct Collaborators {
    pub filesystem: Box<dyn Filesystem>,
    pub prompter: Box<dyn Prompter>,
    pub selector: Box<dyn BuildFileSelector>,
    pub parser: Box<dyn BuildFileParser>,
    pub store: Box<dyn WorkloadStore>,
    pub deployer: Box<dyn Deployer>,
    pub writer: Box<dyn ManifestWriter>,
    pub progress: Box<dyn ProgressReporter>,
}

/// Init-service use case.
pub struct ServiceInitService {
    ports: Collaborators,
    search_root: PathBuf,
    working_dir: Option<PathBuf>,
}

impl ServiceInitService {
    /// `search_root` is where the Dockerfile selector looks for candidates.
    pub fn new(ports: Collaborators, search_root: impl Into<PathBuf>) -> Self {
        Self {
            ports,
            search_root: search_root.into(),
            working_dir: None,
        }
    }

    /// Directory relative paths in the request are resolved from. The
    /// manifest records Dockerfile paths relative to the workspace root
    /// instead.
    pub fn with_working_dir(mut self, working_dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(working_dir.into());
        self
    }

    pub fn search_root(&self) -> &Path {
        &self.search_root
    }

    /// Validate phase.
    #[instrument(skip_all, fields(app = %request.app_name))]
    pub fn validate(&self, request: &ServiceInitRequest) -> BerthResult<ValidatedRequest> {
        RequestValidator::new(self.ports.filesystem.as_ref()).validate(request)
    }

    /// Ask phase.
    pub fn ask(&self, request: ValidatedRequest) -> BerthResult<ResolvedService> {
        InteractiveResolver::new(
            self.ports.prompter.as_ref(),
            self.ports.selector.as_ref(),
            self.ports.parser.as_ref(),
        )
        .resolve(request, &self.search_root)
    }

    /// Execute phase.
    pub fn execute(&self, service: ResolvedService) -> BerthResult<Registration> {
        let mut orchestrator = RegistrationOrchestrator::new(
            self.ports.store.as_ref(),
            self.ports.deployer.as_ref(),
            self.ports.writer.as_ref(),
            self.ports.progress.as_ref(),
        );
        if let Some(dir) = &self.working_dir {
            orchestrator = orchestrator.with_working_dir(dir);
        }
        orchestrator.register(service)
    }

    /// All three phases in order.
    pub fn run(&self, request: &ServiceInitRequest) -> BerthResult<Registration> {
        let validated = self.validate(request)?;
        let resolved = self.ask(validated)?;
        info!(service = %resolved.name, "Service resolved; registering");
        self.execute(resolved)
    }
}
