//! Unified error handling for Berth Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with a category for display and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Berth Core operations.
///
/// Domain and application errors are transparent so that the message a user
/// sees is exactly the step-prefixed message of the failing phase.
#[derive(Debug, Error, Clone)]
pub enum BerthError {
    /// Errors from the domain layer (rejected input).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (interaction, persistence, linkage).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl BerthError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Berth".into(),
                "Please report this issue at: https://github.com/cosecruz/berth/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(_) => ErrorCategory::InvalidInput,
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rejected locally before any side effect.
    InvalidInput,
    /// A prompt or selection failed.
    Interaction,
    /// A value could not be parsed or was out of range.
    Resolution,
    /// Manifest write or store read/write failed.
    Persistence,
    /// Linking the service to its application failed.
    Linkage,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type BerthResult<T> = Result<T, BerthError>;
