//! Workload stores: a JSON file for real use and an in-memory one for tests.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use berth_core::{
    application::{ApplicationError, ports::WorkloadStore},
    domain::{Application, Workload},
    error::BerthResult,
};

use crate::filesystem::map_io_error;

/// File name of the store beneath the deployment root.
pub const STORE_FILE: &str = ".store.json";

/// Everything the store persists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreData {
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub workloads: Vec<Workload>,
}

impl StoreData {
    fn services(&self, app_name: &str) -> Vec<Workload> {
        self.workloads
            .iter()
            .filter(|w| w.app_name == app_name)
            .cloned()
            .collect()
    }

    fn application(&self, name: &str) -> BerthResult<Application> {
        self.applications
            .iter()
            .find(|a| a.name == name)
            .cloned()
            .ok_or_else(|| {
                ApplicationError::ApplicationNotFound {
                    name: name.to_string(),
                }
                .into()
            })
    }

    /// Insert or replace, keyed by `(app, name)`.
    fn upsert_workload(&mut self, workload: &Workload) {
        match self
            .workloads
            .iter_mut()
            .find(|w| w.app_name == workload.app_name && w.name == workload.name)
        {
            Some(existing) => *existing = workload.clone(),
            None => self.workloads.push(workload.clone()),
        }
    }

    /// Insert or replace, keyed by name.
    fn upsert_application(&mut self, app: &Application) {
        match self.applications.iter_mut().find(|a| a.name == app.name) {
            Some(existing) => *existing = app.clone(),
            None => self.applications.push(app.clone()),
        }
    }
}

// ── JSON file ────────────────────────────────────────────────────────────────

/// Store persisted as pretty-printed JSON.
///
/// Every call reads the file afresh; writes go through a temporary file and
/// a rename so a crash never leaves a half-written store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the conventional location under a deployment root.
    pub fn in_root(root: &Path) -> Self {
        Self::new(root.join(STORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Register an application, replacing one of the same name.
    pub fn create_application(&self, app: &Application) -> BerthResult<()> {
        let mut data = self.load()?;
        data.upsert_application(app);
        self.save(&data)
    }

    pub fn load(&self) -> BerthResult<StoreData> {
        if !self.path.exists() {
            return Ok(StoreData::default());
        }
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| map_io_error(&self.path, e, "read store"))?;
        serde_json::from_str(&raw).map_err(|e| {
            ApplicationError::Store {
                reason: format!("{} is corrupt: {}", self.path.display(), e),
            }
            .into()
        })
    }

    fn save(&self, data: &StoreData) -> BerthResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| map_io_error(parent, e, "create directory"))?;
        }
        let json = serde_json::to_string_pretty(data).map_err(|e| ApplicationError::Store {
            reason: e.to_string(),
        })?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| map_io_error(&tmp, e, "write store"))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| map_io_error(&self.path, e, "replace store"))
    }
}

impl WorkloadStore for JsonFileStore {
    fn list_services(&self, app_name: &str) -> BerthResult<Vec<Workload>> {
        Ok(self.load()?.services(app_name))
    }

    #[instrument(skip_all, fields(service = %workload.name, app = %workload.app_name))]
    fn create_service(&self, workload: &Workload) -> BerthResult<()> {
        let mut data = self.load()?;
        data.application(&workload.app_name)?;
        data.upsert_workload(workload);
        self.save(&data)?;
        debug!(path = %self.path.display(), "Workload saved");
        Ok(())
    }

    fn get_application(&self, name: &str) -> BerthResult<Application> {
        self.load()?.application(name)
    }
}

// ── In memory ────────────────────────────────────────────────────────────────

/// Thread-safe in-memory store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<StoreData>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `app`.
    pub fn with_application(app: Application) -> Self {
        let store = Self::new();
        if let Ok(mut inner) = store.inner.write() {
            inner.upsert_application(&app);
        }
        store
    }

    /// Snapshot of everything stored.
    pub fn snapshot(&self) -> BerthResult<StoreData> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.clone())
    }
}

impl WorkloadStore for InMemoryStore {
    fn list_services(&self, app_name: &str) -> BerthResult<Vec<Workload>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.services(app_name))
    }

    fn create_service(&self, workload: &Workload) -> BerthResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.application(&workload.app_name)?;
        inner.upsert_workload(workload);
        Ok(())
    }

    fn get_application(&self, name: &str) -> BerthResult<Application> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.application(name)
    }
}
