//! Filesystem adapters.

mod local;
mod memory;

pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;

use std::io;
use std::path::Path;

use berth_core::{application::ApplicationError, error::BerthError};

/// Map an I/O failure to the application's filesystem error.
pub(crate) fn map_io_error(path: &Path, e: io::Error, operation: &str) -> BerthError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
