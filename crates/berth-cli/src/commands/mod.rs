//! One module per subcommand. Each exposes `execute`, called from `main::run`.

pub mod config;
pub mod svc_init;
pub mod workspace;
