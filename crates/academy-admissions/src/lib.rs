//! Admission application intake, review, and reporting for the academy's numbered cohorts.

pub mod admissions;
pub mod config;
pub mod error;
pub mod telemetry;
