use crate::domain::{
    error::{DomainError, NAME_FORMAT_REASON},
    value_objects::ServiceType,
};

const MAX_NAME_LEN: usize = 255;

/// Centralized domain validation.
///
/// Every check here is pure: no filesystem, no network. The single I/O check
/// of the Validate phase (Dockerfile directory existence) lives in the
/// application layer behind the `Filesystem` port.
pub struct DomainValidator;

impl DomainValidator {
    /// Parse a user-supplied service type against the closed set.
    pub fn parse_service_type(raw: &str) -> Result<ServiceType, DomainError> {
        raw.parse()
    }

    /// Check a service name against the identifier format.
    pub fn validate_service_name(name: &str) -> Result<(), DomainError> {
        if is_valid_name(name) {
            Ok(())
        } else {
            Err(DomainError::InvalidName {
                name: name.to_string(),
                reason: NAME_FORMAT_REASON,
            })
        }
    }

    /// A Dockerfile and a pre-built image are mutually exclusive.
    pub fn validate_source(dockerfile: bool, image: bool) -> Result<(), DomainError> {
        if dockerfile && image {
            return Err(DomainError::ConflictingSource);
        }
        Ok(())
    }

    pub fn validate_app_name(app_name: &str) -> Result<(), DomainError> {
        if app_name.trim().is_empty() {
            return Err(DomainError::NoApplicationContext);
        }
        Ok(())
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_lowercase() || name.len() < 2 || name.len() > MAX_NAME_LEN {
        return false;
    }
    if name.ends_with('-') || name.contains("--") {
        return false;
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_names() {
        for name in ["frontend", "api", "order-worker", "svc2", "a1"] {
            assert!(
                DomainValidator::validate_service_name(name).is_ok(),
                "rejected: {name}"
            );
        }
    }

    #[test]
    fn rejects_malformed_names() {
        for name in [
            "", "1234", "a", "Frontend", "-api", "api-", "my--svc", "my_svc", "my svc",
        ] {
            assert!(
                matches!(
                    DomainValidator::validate_service_name(name),
                    Err(DomainError::InvalidName { .. })
                ),
                "accepted: {name:?}"
            );
        }
    }

    #[test]
    fn rejects_overlong_names() {
        let name = format!("a{}", "b".repeat(MAX_NAME_LEN));
        assert!(DomainValidator::validate_service_name(&name).is_err());
    }

    #[test]
    fn conflicting_source_only_when_both_set() {
        assert_eq!(
            DomainValidator::validate_source(true, true),
            Err(DomainError::ConflictingSource)
        );
        assert!(DomainValidator::validate_source(true, false).is_ok());
        assert!(DomainValidator::validate_source(false, true).is_ok());
        assert!(DomainValidator::validate_source(false, false).is_ok());
    }

    #[test]
    fn blank_app_name_means_no_workspace() {
        assert_eq!(
            DomainValidator::validate_app_name("  "),
            Err(DomainError::NoApplicationContext)
        );
        assert!(DomainValidator::validate_app_name("phonetool").is_ok());
    }
}
