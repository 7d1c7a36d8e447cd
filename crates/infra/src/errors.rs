//! Infrastructure error types

use tempo_domain::TempoError;
use thiserror::Error;

/// Infrastructure-side errors, converted into [`TempoError`] at the crate
/// boundary.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<InfraError> for TempoError {
    fn from(err: InfraError) -> Self {
        match err {
            InfraError::Http(source) => {
                if source.is_timeout() || source.is_connect() {
                    TempoError::Network(source.to_string())
                } else {
                    TempoError::Internal(source.to_string())
                }
            }
            InfraError::Io(source) => TempoError::Internal(source.to_string()),
            InfraError::Serialization(source) => TempoError::Internal(source.to_string()),
            InfraError::Other(message) => TempoError::Internal(message),
        }
    }
}
