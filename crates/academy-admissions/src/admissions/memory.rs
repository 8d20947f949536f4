use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use super::domain::{Application, ApplicationId};
use super::query::ApplicationFilter;
use super::repository::{ApplicationRepository, RepositoryError};

/// Process-local application store.
///
/// Clones share the same records. Every write holds the single write guard for its full
/// read-check-modify sequence, so concurrent submissions cannot both pass the duplicate
/// check. Once [`close`](Self::close) is called every operation fails with
/// [`RepositoryError::Unavailable`].
#[derive(Debug, Clone)]
pub struct InMemoryApplicationRepository {
    records: Arc<RwLock<Vec<Application>>>,
    open: Arc<AtomicBool>,
}

impl Default for InMemoryApplicationRepository {
    fn default() -> Self {
        Self::open()
    }
}

impl InMemoryApplicationRepository {
    pub fn open() -> Self {
        Self::with_records(Vec::new())
    }

    /// Open a store holding `records` in the given (newest-first) order.
    pub fn with_records(records: Vec<Application>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
            open: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn close(&self) {
        if self.open.swap(false, Ordering::AcqRel) {
            debug!("application store closed");
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    pub fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.read()?.is_empty())
    }

    fn ensure_open(&self) -> Result<(), RepositoryError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(RepositoryError::Unavailable("store closed".to_string()))
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Application>>, RepositoryError> {
        self.ensure_open()?;
        self.records
            .read()
            .map_err(|_| RepositoryError::Unavailable("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Application>>, RepositoryError> {
        self.ensure_open()?;
        self.records
            .write()
            .map_err(|_| RepositoryError::Unavailable("store lock poisoned".to_string()))
    }
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut records = self.write()?;
        if records.iter().any(|existing| existing.id == application.id) {
            return Err(RepositoryError::IdentifierTaken(application.id));
        }
        if records
            .iter()
            .any(|existing| existing.conflicts_with(&application))
        {
            return Err(RepositoryError::Conflict);
        }
        records.insert(0, application.clone());
        Ok(application)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        let records = self.read()?;
        Ok(records.iter().find(|record| &record.id == id).cloned())
    }

    fn update(
        &self,
        id: &ApplicationId,
        change: &mut dyn FnMut(&mut Application),
    ) -> Result<Application, RepositoryError> {
        let mut records = self.write()?;
        let record = records
            .iter_mut()
            .find(|record| &record.id == id)
            .ok_or(RepositoryError::NotFound)?;
        change(record);
        Ok(record.clone())
    }

    fn delete(&self, id: &ApplicationId) -> Result<Application, RepositoryError> {
        let mut records = self.write()?;
        let position = records
            .iter()
            .position(|record| &record.id == id)
            .ok_or(RepositoryError::NotFound)?;
        Ok(records.remove(position))
    }

    fn list(&self, filter: &ApplicationFilter) -> Result<Vec<Application>, RepositoryError> {
        let records = self.read()?;
        Ok(records
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }
}
