//! Validate phase: reject malformed input before anything touches the
//! network or writes to disk.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    application::ports::Filesystem,
    domain::{DomainError, DomainValidator as validator, ServiceInitRequest, ValidatedRequest},
    error::BerthResult,
};

/// Checks a raw [`ServiceInitRequest`].
///
/// The only I/O performed is an existence check on the directory holding an
/// explicit Dockerfile path. Idempotent: safe to call repeatedly.
pub struct RequestValidator<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> RequestValidator<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Run every check in order; the first failure wins.
    pub fn validate(&self, request: &ServiceInitRequest) -> BerthResult<ValidatedRequest> {
        // 1. Service type, if supplied, must be in the closed set
        let service_type = request
            .service_type_input()
            .map(validator::parse_service_type)
            .transpose()?;

        // 2. Name format
        if let Some(name) = request.name_input() {
            validator::validate_service_name(name)?;
        }

        // 3. Source conflict
        let dockerfile = request.dockerfile_input().map(clean_path);
        let image = request.image_input();
        validator::validate_source(dockerfile.is_some(), image.is_some())?;

        // 4. Dockerfile directory must exist
        if let Some(path) = &dockerfile {
            self.check_dockerfile_dir(path)?;
        }

        // 5. Application context
        validator::validate_app_name(&request.app_name)?;

        debug!(
            service_type = ?service_type,
            name = request.name_input().unwrap_or(""),
            "Request validated"
        );

        Ok(ValidatedRequest::new(
            service_type,
            request.name_input().map(str::to_string),
            dockerfile,
            image.map(str::to_string),
            request.port_input(),
            request.app_name.trim().to_string(),
        ))
    }

    fn check_dockerfile_dir(&self, path: &Path) -> BerthResult<()> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        if self.filesystem.exists(dir) {
            return Ok(());
        }
        Err(DomainError::BuildFileNotFound {
            path: path.display().to_string(),
            directory: dir.display().to_string(),
        }
        .into())
    }
}

/// Drop `.` components so `./hello/Dockerfile` reads as `hello/Dockerfile`.
fn clean_path(path: &Path) -> PathBuf {
    let cleaned: PathBuf = path
        .components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .collect();
    if cleaned.as_os_str().is_empty() {
        path.to_path_buf()
    } else {
        cleaned
    }
}
