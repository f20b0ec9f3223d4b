// ============================================================================
// domain/error.rs - INPUT VALIDATION ERRORS
// ============================================================================

use thiserror::Error;

use crate::domain::value_objects::ServiceType;

/// Reason attached to every rejected service name.
pub const NAME_FORMAT_REASON: &str = "value must start with a letter, contain only lower-case letters, numbers, and hyphens, and have no consecutive or trailing hyphen";

/// Root domain error type.
///
/// All errors are:
/// - Detected locally, before any network or disk write
/// - Cloneable and comparable (for test assertions)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Request Validation
    // ========================================================================
    #[error("invalid service type {value}: must be one of {}", ServiceType::quoted_list())]
    InvalidServiceType { value: String },

    #[error("service name {name} is invalid: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("--dockerfile and --image cannot be specified together")]
    ConflictingSource,

    #[error("open {path}: directory {directory} does not exist")]
    BuildFileNotFound { path: String, directory: String },

    #[error("could not find an application attached to this workspace, please run `berth workspace init` first")]
    NoApplicationContext,

    // ========================================================================
    // Manifest Invariants
    // ========================================================================
    #[error("Invalid manifest for service {name}: {reason}")]
    InvalidManifest { name: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidServiceType { .. } => {
                let mut out = vec!["Supported service types:".to_string()];
                for t in ServiceType::ALL {
                    out.push(format!("  • {} (--svc-type {})", t, t.slug()));
                }
                out
            }
            Self::InvalidName { .. } => vec![
                "Use lower-case letters, numbers and single hyphens".into(),
                "Start with a letter".into(),
                "Examples: frontend, api, order-worker".into(),
            ],
            Self::ConflictingSource => vec![
                "Pass --dockerfile to build an image from source".into(),
                "Or pass --image to deploy an existing image".into(),
            ],
            Self::BuildFileNotFound { directory, .. } => vec![
                format!("Check that '{}' exists", directory),
                "Dockerfile paths are relative to the current directory".into(),
            ],
            Self::NoApplicationContext => vec![
                "Run this command from inside a berth workspace".into(),
                "Or create one: berth workspace init --app <name>".into(),
                "Or pass the application explicitly with --app".into(),
            ],
            Self::InvalidManifest { .. } => vec!["See documentation for more details".into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_type_message_enumerates_valid_set() {
        let err = DomainError::InvalidServiceType {
            value: "TestSvcType".into(),
        };
        assert_eq!(
            err.to_string(),
            r#"invalid service type TestSvcType: must be one of "Load Balanced Web Service", "Backend Service""#
        );
    }

    #[test]
    fn invalid_name_message_names_value() {
        let err = DomainError::InvalidName {
            name: "1234".into(),
            reason: NAME_FORMAT_REASON,
        };
        assert!(err.to_string().starts_with("service name 1234 is invalid: "));
    }

    #[test]
    fn missing_build_file_names_path() {
        let err = DomainError::BuildFileNotFound {
            path: "hello/Dockerfile".into(),
            directory: "hello".into(),
        };
        assert!(err.to_string().contains("hello/Dockerfile"));
    }

    #[test]
    fn every_variant_has_suggestions() {
        let errs = [
            DomainError::InvalidServiceType { value: "x".into() },
            DomainError::ConflictingSource,
            DomainError::NoApplicationContext,
        ];
        for err in errs {
            assert!(!err.suggestions().is_empty(), "no suggestions for {err:?}");
        }
    }
}
