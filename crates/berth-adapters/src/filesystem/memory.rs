//! In-memory filesystem adapter for testing.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use berth_core::application::ports::Filesystem;

/// In-memory filesystem for testing.
///
/// Adding a path also adds all of its ancestors.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<HashSet<PathBuf>>>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filesystem containing `paths`.
    pub fn with_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let fs = Self::new();
        for path in paths {
            fs.add(path.as_ref());
        }
        fs
    }

    /// Record `path` and its ancestors as existing.
    pub fn add(&self, path: &Path) {
        let Ok(mut inner) = self.inner.write() else {
            return;
        };
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.insert(current.clone());
        }
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        if path == Path::new(".") {
            return true;
        }
        self.inner
            .read()
            .map(|inner| inner.contains(path))
            .unwrap_or(false)
    }
}
