use crate::admissions::AdmissionServiceError;
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use std::fmt;

/// Process-level failures surfaced by the CLI and server bootstrap.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Admissions(AdmissionServiceError),
    Serialization(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Admissions(err) => write!(f, "admissions error: {}", err),
            AppError::Serialization(err) => write!(f, "serialization error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Admissions(err) => Some(err),
            AppError::Serialization(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<AdmissionServiceError> for AppError {
    fn from(value: AdmissionServiceError) -> Self {
        Self::Admissions(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admissions::RepositoryError;
    use std::error::Error as _;

    #[test]
    fn admissions_errors_keep_their_source() {
        let err = AppError::from(AdmissionServiceError::from(RepositoryError::Unavailable(
            "store closed".to_string(),
        )));
        assert_eq!(
            err.to_string(),
            "admissions error: repository unavailable: store closed"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn config_errors_are_wrapped() {
        let err = AppError::from(ConfigError::InvalidPort);
        assert_eq!(
            err.to_string(),
            "configuration error: APP_PORT must be a valid u16"
        );
    }
}
