//! Execute phase: commit a resolved service.
//!
//! Steps run strictly in order and there is no rollback; a failure leaves
//! the effects of earlier steps in place. Re-running overwrites the
//! manifest and upserts the workload, so a retry converges.

use std::path::Path;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Deployer, ManifestWriter, ProgressOutcome, ProgressReporter, WorkloadStore},
        services::manifest_builder::ManifestBuilder,
    },
    domain::{Registration, ResolvedService},
    error::BerthResult,
};

pub fn progress_start(name: &str) -> String {
    format!("Creating registry entries for service {name}.")
}

pub fn progress_success(name: &str) -> String {
    format!("Created registry entries for service {name}.")
}

pub fn progress_failure(name: &str) -> String {
    format!("Failed to create registry entries for service {name}.")
}

pub struct RegistrationOrchestrator<'a> {
    store: &'a dyn WorkloadStore,
    deployer: &'a dyn Deployer,
    writer: &'a dyn ManifestWriter,
    progress: &'a dyn ProgressReporter,
    working_dir: Option<&'a Path>,
}

impl<'a> RegistrationOrchestrator<'a> {
    pub fn new(
        store: &'a dyn WorkloadStore,
        deployer: &'a dyn Deployer,
        writer: &'a dyn ManifestWriter,
        progress: &'a dyn ProgressReporter,
    ) -> Self {
        Self {
            store,
            deployer,
            writer,
            progress,
            working_dir: None,
        }
    }

    /// Directory relative Dockerfile paths in the service were given from.
    pub fn with_working_dir(mut self, working_dir: &'a Path) -> Self {
        self.working_dir = Some(working_dir);
        self
    }

    #[instrument(skip_all, fields(app = %service.app_name, service = %service.name))]
    pub fn register(&self, service: ResolvedService) -> BerthResult<Registration> {
        let app = self
            .store
            .get_application(&service.app_name)
            .map_err(|e| ApplicationError::GetApplication {
                app: service.app_name.clone(),
                source: Box::new(e),
            })?;

        let root = self.writer.root_path()?;
        let mut builder = ManifestBuilder::new(self.store);
        if let Some(dir) = self.working_dir {
            builder = builder.with_working_dir(dir);
        }
        let manifest = builder.build(&service, root.parent())?;
        let manifest_path = self.writer.write_service_manifest(&manifest, &service.name)?;
        info!(path = %manifest_path.display(), "Manifest written");

        let workload = service.workload();
        self.store
            .create_service(&workload)
            .map_err(|e| ApplicationError::SaveService {
                name: service.name.clone(),
                source: Box::new(e),
            })?;

        self.progress.start(&progress_start(&service.name));
        if let Err(e) = self.deployer.add_service_to_app(&app, &service.name) {
            self.progress
                .stop(ProgressOutcome::Failure, &progress_failure(&service.name));
            warn!(error = %e, "Linking service to application failed");
            return Err(ApplicationError::AddServiceToApp {
                name: service.name.clone(),
                app: app.name.clone(),
                source: Box::new(e),
            }
            .into());
        }
        self.progress
            .stop(ProgressOutcome::Success, &progress_success(&service.name));

        info!("Service registered");
        Ok(Registration {
            manifest_path,
            workload,
        })
    }
}
