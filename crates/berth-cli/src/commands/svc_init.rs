//! `berth svc init`: wire the adapters and run the init-service workflow.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, instrument};

use berth_adapters::{
    DockerfileParser, DockerfileSelector, JsonFileStore, LocalFilesystem, RegistryDeployer,
    Workspace, WorkspaceManifestWriter, workspace::DEPLOYMENT_DIR,
};
use berth_core::prelude::*;

use crate::{
    cli::SvcInitArgs,
    config::AppConfig,
    error::CliResult,
    interactive::{DialoguerPrompter, SpinnerProgress},
    output::OutputManager,
};

/// What `--output-format json` prints on success.
#[derive(Debug, Serialize)]
struct Summary<'a> {
    application: &'a str,
    service: &'a str,
    #[serde(rename = "type")]
    service_type: ServiceType,
    manifest: &'a Path,
}

#[instrument(skip_all)]
pub fn execute(args: SvcInitArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let cwd = std::env::current_dir()?;
    let workspace = Workspace::discover(&cwd)?;

    let app = args
        .app
        .clone()
        .or_else(|| workspace.as_ref().map(|w| w.application().to_string()))
        .unwrap_or_default();
    debug!(app = %app, workspace = ?workspace.as_ref().map(Workspace::root), "Context resolved");

    let service = ServiceInitService::new(
        collaborators(workspace.as_ref(), &cwd, &config, &output),
        workspace
            .as_ref()
            .map(|w| w.root().to_path_buf())
            .unwrap_or_else(|| cwd.clone()),
    )
    .with_working_dir(cwd.clone());

    let registration = service.run(&request(args, app))?;
    report(&registration, &cwd, &output)
}

fn collaborators(
    workspace: Option<&Workspace>,
    cwd: &Path,
    config: &AppConfig,
    output: &OutputManager,
) -> Collaborators {
    // Without a workspace the store is still read so that an unknown
    // application is reported before the missing manifest root.
    let deployment_root = workspace
        .map(Workspace::deployment_root)
        .unwrap_or_else(|| cwd.join(DEPLOYMENT_DIR));
    let writer = match workspace {
        Some(w) => WorkspaceManifestWriter::new(w.deployment_root()),
        None => WorkspaceManifestWriter::without_workspace(),
    };

    Collaborators {
        filesystem: Box::new(LocalFilesystem::new()),
        prompter: Box::new(DialoguerPrompter::new()),
        selector: Box::new(
            DockerfileSelector::new(DialoguerPrompter::new())
                .with_max_depth(config.workspace.dockerfile_search_depth),
        ),
        parser: Box::new(DockerfileParser::new()),
        store: Box::new(JsonFileStore::in_root(&deployment_root)),
        deployer: Box::new(RegistryDeployer::in_root(&deployment_root)),
        writer: Box::new(writer),
        progress: Box::new(SpinnerProgress::new(
            output.is_quiet() || output.is_json(),
            !output.supports_color(),
        )),
    }
}

fn request(args: SvcInitArgs, app: String) -> ServiceInitRequest {
    let mut request = ServiceInitRequest::new(app);
    if let Some(service_type) = args.svc_type {
        request = request.with_service_type(service_type);
    }
    if let Some(name) = args.name {
        request = request.with_name(name);
    }
    if let Some(dockerfile) = args.dockerfile {
        request = request.with_dockerfile(dockerfile);
    }
    if let Some(image) = args.image {
        request = request.with_image(image);
    }
    if let Some(port) = args.port {
        request = request.with_port(port);
    }
    request
}

fn report(registration: &Registration, cwd: &Path, output: &OutputManager) -> CliResult<()> {
    let workload = &registration.workload;

    if output.is_json() {
        output.json(&Summary {
            application: &workload.app_name,
            service: &workload.name,
            service_type: workload.service_type,
            manifest: &registration.manifest_path,
        })?;
        return Ok(());
    }

    output.success(&format!(
        "Wrote the manifest for {} {} at {}",
        workload.service_type,
        workload.name,
        display_path(&registration.manifest_path, cwd).display()
    ))?;
    output.info("Edit the manifest to adjust the service's configuration.")?;
    Ok(())
}

/// `path` relative to `cwd` when it lies beneath it.
fn display_path(path: &Path, cwd: &Path) -> PathBuf {
    path.strip_prefix(cwd)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}
