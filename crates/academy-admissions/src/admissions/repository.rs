use super::domain::{Application, ApplicationId};
use super::query::ApplicationFilter;

/// Storage abstraction so the service module can be exercised in isolation.
///
/// Implementations own mutation ordering: `insert` must check the (phone, generation)
/// uniqueness rule and store the record as one atomic step, and `update` must apply the
/// change against the current record without a lost-update window.
pub trait ApplicationRepository: Send + Sync {
    /// Store a new record ahead of all existing ones.
    fn insert(&self, application: Application) -> Result<Application, RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError>;
    /// Apply `change` to the stored record and return the result.
    fn update(
        &self,
        id: &ApplicationId,
        change: &mut dyn FnMut(&mut Application),
    ) -> Result<Application, RepositoryError>;
    fn delete(&self, id: &ApplicationId) -> Result<Application, RepositoryError>;
    /// Matching records in storage order, newest first.
    fn list(&self, filter: &ApplicationFilter) -> Result<Vec<Application>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("an application for this phone and generation already exists")]
    Conflict,
    #[error("identifier {0} is already in use")]
    IdentifierTaken(ApplicationId),
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
