//! Error handling for the berth CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use berth_core::{
    application::ApplicationError,
    error::{BerthError, ErrorCategory as CoreCategory},
};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// A configuration value was unknown or could not be rendered.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error from the init-service workflow or one of its adapters.
    ///
    /// Transparent so the user sees the step-prefixed message unchanged.
    #[error(transparent)]
    Core(#[from] BerthError),

    /// An I/O operation of the CLI itself failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// User-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                "Run 'berth config path' to find the config file".into(),
                "Run 'berth config list' to see the known keys".into(),
            ],
            Self::Core(core) => core.suggestions(),
            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
            ],
        }
    }

    /// Category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) if is_missing_application(core) => ErrorCategory::NotFound,
            Self::Core(core) => match core.category() {
                CoreCategory::InvalidInput | CoreCategory::Interaction | CoreCategory::Resolution => {
                    ErrorCategory::UserError
                }
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Persistence | CoreCategory::Linkage | CoreCategory::Internal => {
                    ErrorCategory::Internal
                }
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "\u{2717}".red().bold(),
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "\u{2192}".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`].
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {self}\n"));

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }
    }
}

/// True when the application itself is unknown, however deeply the
/// workflow wrapped that failure.
fn is_missing_application(err: &BerthError) -> bool {
    match err {
        BerthError::Application(ApplicationError::ApplicationNotFound { .. }) => true,
        BerthError::Application(ApplicationError::GetApplication { source, .. }) => {
            is_missing_application(source)
        }
        _ => false,
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad flags, bad answers, or a cancelled prompt.
    UserError,
    /// The application is not registered.
    NotFound,
    Configuration,
    /// Store, registry, filesystem, or a bug.
    Internal,
}

#[cfg(test)]
mod tests {
    use std::io;

    use berth_core::domain::DomainError;

    use super::*;

    fn core(err: impl Into<BerthError>) -> CliError {
        CliError::Core(err.into())
    }

    #[test]
    fn invalid_input_exits_two() {
        assert_eq!(core(DomainError::ConflictingSource).exit_code(), 2);
        assert_eq!(core(DomainError::NoApplicationContext).exit_code(), 2);
    }

    #[test]
    fn failed_prompt_exits_two() {
        let err = core(ApplicationError::Prompt {
            reason: "not a terminal".into(),
        });
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn unknown_application_exits_three_even_when_wrapped() {
        let missing: BerthError = ApplicationError::ApplicationNotFound {
            name: "phonetool".into(),
        }
        .into();
        let wrapped = ApplicationError::GetApplication {
            app: "phonetool".into(),
            source: Box::new(missing.clone()),
        };

        assert_eq!(core(missing).exit_code(), 3);
        assert_eq!(core(wrapped).exit_code(), 3);
    }

    #[test]
    fn other_store_failures_exit_one() {
        let err = core(ApplicationError::GetApplication {
            app: "phonetool".into(),
            source: Box::new(
                ApplicationError::Store {
                    reason: "disk full".into(),
                }
                .into(),
            ),
        });
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn configuration_exits_four() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
        let missing_workspace = core(BerthError::Configuration {
            message: "no workspace found".into(),
        });
        assert_eq!(missing_workspace.exit_code(), 4);
    }

    #[test]
    fn io_error_exits_one() {
        let err: CliError = io::Error::other("e").into();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn core_message_is_shown_verbatim() {
        let err = core(DomainError::ConflictingSource);
        assert_eq!(err.to_string(), BerthError::from(DomainError::ConflictingSource).to_string());
    }

    #[test]
    fn format_plain_has_header_and_suggestions() {
        let s = core(DomainError::ConflictingSource).format_plain(false);
        assert!(s.contains("Error:"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_omits_hint() {
        let s = core(DomainError::ConflictingSource).format_plain(true);
        assert!(!s.contains("--verbose"));
    }
}
