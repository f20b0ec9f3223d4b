//! CLI argument definitions using the clap derive API.
//!
//! Only argument names, aliases and help text live here. Flag values reach
//! the core untouched so the workflow's own validation produces the error
//! messages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "berth",
    bin_name = "berth",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Register containerised services with their application",
    long_about = "Berth initialises services: it asks for whatever you left out, \
                  writes a deployment manifest and records the service in the \
                  application's registry.",
    after_help = "EXAMPLES:\n\
        \x20 berth workspace init --app phonetool\n\
        \x20 berth svc init\n\
        \x20 berth svc init --name api --svc-type \"Backend Service\" --dockerfile api/Dockerfile\n\
        \x20 berth svc init --name web --svc-type lb-web-svc --image nginx:latest --port 80",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Work with services.
    #[command(subcommand, visible_alias = "service")]
    Svc(SvcCommands),

    /// Set up the directory berth keeps manifests in.
    #[command(subcommand, visible_alias = "ws")]
    Workspace(WorkspaceCommands),

    /// Inspect the berth configuration.
    #[command(
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 berth config list\n\
            \x20 berth config get workspace.dockerfile_search_depth\n\
            \x20 berth config path"
    )]
    Config(ConfigCommands),
}

// ── svc ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum SvcCommands {
    /// Create a new service in an application.
    ///
    /// Every flag is optional; anything missing is asked for interactively.
    #[command(after_help = "EXAMPLES:\n\
        \x20 berth svc init\n\
        \x20 berth svc init --name frontend --dockerfile ./frontend/Dockerfile\n\
        \x20 berth svc init --name api --svc-type \"Backend Service\" --image redis:7")]
    Init(SvcInitArgs),
}

/// Arguments for `berth svc init`.
#[derive(Debug, Args)]
pub struct SvcInitArgs {
    /// Name of the service.
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// Type of service: "Load Balanced Web Service" or "Backend Service".
    #[arg(short = 't', long = "svc-type", value_name = "TYPE")]
    pub svc_type: Option<String>,

    /// Path to the Dockerfile. Cannot be combined with --image.
    #[arg(short = 'd', long = "dockerfile", value_name = "PATH")]
    pub dockerfile: Option<PathBuf>,

    /// Location of an existing image. Cannot be combined with --dockerfile.
    #[arg(short = 'i', long = "image", value_name = "LOCATION")]
    pub image: Option<String>,

    /// Port the service listens on.
    #[arg(long = "port", value_name = "PORT")]
    pub port: Option<u16>,

    /// Application the service belongs to. Defaults to the workspace's.
    #[arg(short = 'a', long = "app", value_name = "APP")]
    pub app: Option<String>,
}

// ── workspace ─────────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum WorkspaceCommands {
    /// Mark the current directory as the workspace of an application.
    Init(WorkspaceInitArgs),
}

/// Arguments for `berth workspace init`.
#[derive(Debug, Args)]
pub struct WorkspaceInitArgs {
    /// Application name.
    #[arg(short = 'a', long = "app", value_name = "APP")]
    pub app: String,

    /// Account that owns the application. Defaults to
    /// `workspace.default_account` from the configuration.
    #[arg(long = "account", value_name = "ID")]
    pub account: Option<String>,
}

// ── config ────────────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration.
    #[command(visible_alias = "ls")]
    List,

    /// Print one configuration value.
    Get {
        /// Dotted key, e.g. `output.format`.
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Print the default configuration file location.
    Path,
}
