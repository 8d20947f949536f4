use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info};

use super::domain::{Application, ApplicationId};
use super::query::{ApplicationFilter, ApplicationPage, ListQuery};
use super::repository::{ApplicationRepository, RepositoryError};
use super::stats::ApplicationStats;
use super::validation::{validate_status_update, validate_submission, ValidationErrors};

/// Attempts at finding a free identifier before a submission gives up.
const ID_ATTEMPTS: usize = 4;

/// Service composing the submission schemas and the application repository.
pub struct AdmissionService<R> {
    repository: Arc<R>,
    ids: IdSequence,
}

/// Millisecond-timestamp identifiers, bumped past the last issued value so two
/// submissions in the same millisecond still get distinct ids.
#[derive(Debug, Default)]
struct IdSequence {
    last: AtomicU64,
}

impl IdSequence {
    fn next(&self, now: DateTime<Utc>) -> ApplicationId {
        let candidate = u64::try_from(now.timestamp_millis()).unwrap_or_default();
        let previous = self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                Some(candidate.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        ApplicationId(candidate.max(previous + 1).to_string())
    }

    /// Skip past an identifier found in the store that this sequence did not issue.
    fn advance_past(&self, taken: &ApplicationId) {
        if let Ok(value) = taken.as_str().parse::<u64>() {
            self.last.fetch_max(value, Ordering::AcqRel);
        }
    }
}

impl<R> AdmissionService<R>
where
    R: ApplicationRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            ids: IdSequence::default(),
        }
    }

    /// Filter, then paginate, in storage order.
    pub fn list(&self, query: &ListQuery) -> Result<ApplicationPage, AdmissionServiceError> {
        let matching = match query.filter() {
            Some(filter) => self.repository.list(&filter)?,
            None => Vec::new(),
        };
        Ok(query.page_request().paginate(matching))
    }

    /// Validate and store a new application in the `Pending` state.
    pub fn submit(&self, payload: &Value) -> Result<Application, AdmissionServiceError> {
        self.submit_at(payload, Utc::now())
    }

    pub(crate) fn submit_at(
        &self,
        payload: &Value,
        now: DateTime<Utc>,
    ) -> Result<Application, AdmissionServiceError> {
        let submission = validate_submission(payload).map_err(|errors| {
            debug!(violations = errors.violations().len(), "submission rejected");
            errors
        })?;

        let mut application = Application::from_submission(self.ids.next(now), submission, now);
        let mut attempt = 1;
        let stored = loop {
            match self.repository.insert(application.clone()) {
                Err(RepositoryError::IdentifierTaken(taken)) if attempt < ID_ATTEMPTS => {
                    debug!(id = %taken, attempt, "identifier already stored, reissuing");
                    self.ids.advance_past(&taken);
                    application.id = self.ids.next(now);
                    attempt += 1;
                }
                result => break result?,
            }
        };

        info!(
            id = %stored.id,
            generation = stored.generation,
            "application submitted"
        );
        Ok(stored)
    }

    /// Fetch an application; absent identifiers surface as `RepositoryError::NotFound`.
    pub fn get(&self, id: &ApplicationId) -> Result<Application, AdmissionServiceError> {
        let application = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(application)
    }

    /// Validate a reviewer decision and apply it, stamping the review time.
    pub fn update_status(
        &self,
        id: &ApplicationId,
        payload: &Value,
    ) -> Result<Application, AdmissionServiceError> {
        let update = validate_status_update(payload)?;
        let reviewed_at = Utc::now();
        let updated = self
            .repository
            .update(id, &mut |application: &mut Application| {
                application.apply_update(&update, reviewed_at)
            })?;

        info!(
            id = %updated.id,
            status = updated.status.label(),
            reviewer = updated.reviewer.as_deref().unwrap_or("-"),
            "application status updated"
        );
        Ok(updated)
    }

    pub fn delete(&self, id: &ApplicationId) -> Result<Application, AdmissionServiceError> {
        let removed = self.repository.delete(id)?;
        info!(id = %removed.id, "application deleted");
        Ok(removed)
    }

    pub fn stats(&self) -> Result<ApplicationStats, AdmissionServiceError> {
        let applications = self.repository.list(&ApplicationFilter::default())?;
        Ok(ApplicationStats::from_applications(&applications))
    }
}

/// Error raised by the admission service.
#[derive(Debug, thiserror::Error)]
pub enum AdmissionServiceError {
    #[error("request body is not valid JSON: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
