//! Admission applications for the academy's numbered cohorts ("generations").
//!
//! Submissions arrive as untyped JSON, pass through the schemas in [`validation`], and are
//! stored behind the [`ApplicationRepository`] seam. The [`AdmissionService`] composes the
//! two and [`admissions_router`] exposes the service over HTTP.

pub mod domain;
pub mod memory;
pub mod messages;
pub mod query;
pub mod repository;
pub mod router;
pub mod service;
pub mod stats;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationId, ApplicationStatus, ApplicationSubmission, ApplicationSummary,
    Gender, GolfParticipation, StatusUpdate, TaxInvoice,
};
pub use memory::InMemoryApplicationRepository;
pub use query::{ApplicationFilter, ApplicationPage, ListQuery, PageRequest, Pagination};
pub use repository::{ApplicationRepository, RepositoryError};
pub use router::admissions_router;
pub use service::{AdmissionService, AdmissionServiceError};
pub use stats::{ApplicationStats, GenerationCount, MonthlyCount};
pub use validation::{FieldViolation, ValidationErrors};
