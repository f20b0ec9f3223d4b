//! `berth workspace init`: mark the current directory as an application's
//! workspace and register the application in its store.

use serde::Serialize;
use tracing::{info, instrument};

use berth_adapters::{JsonFileStore, Workspace};
use berth_core::domain::Application;

use crate::{
    cli::{WorkspaceCommands, WorkspaceInitArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct Summary<'a> {
    application: &'a Application,
    root: &'a std::path::Path,
}

pub fn execute(cmd: WorkspaceCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        WorkspaceCommands::Init(args) => init(args, config, output),
    }
}

#[instrument(skip_all, fields(app = %args.app))]
fn init(args: WorkspaceInitArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let cwd = std::env::current_dir()?;
    let workspace = Workspace::init(&cwd, &args.app)?;

    let account = args
        .account
        .unwrap_or(config.workspace.default_account);
    let application = Application::new(workspace.application(), account);
    JsonFileStore::in_root(&workspace.deployment_root()).create_application(&application)?;
    info!(account = %application.account_id, "Application registered");

    if output.is_json() {
        output.json(&Summary {
            application: &application,
            root: workspace.root(),
        })?;
        return Ok(());
    }

    output.success(&format!(
        "Created workspace for application {} in {}",
        application.name,
        workspace.deployment_root().display()
    ))?;
    output.info("Next: berth svc init")?;
    Ok(())
}
