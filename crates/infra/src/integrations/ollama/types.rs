//! Ollama API request/response types

use serde::{Deserialize, Serialize};
use tempo_domain::TempoError;
use thiserror::Error;

/// Request body for `POST /api/generate`.
#[derive(Debug, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    /// Always false: the complete response is consumed at once.
    pub stream: bool,
}

/// Response body for `POST /api/generate` (non-streaming).
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub model: String,
    pub response: String,
    pub done: bool,
}

/// Ollama client errors
#[derive(Debug, Error)]
pub enum OllamaError {
    /// Network failure reaching the daemon
    #[error("Ollama network error: {0}")]
    Network(String),

    /// Non-success status from the API
    #[error("Ollama API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Invalid Ollama response: {0}")]
    InvalidResponse(String),
}

impl From<OllamaError> for TempoError {
    fn from(err: OllamaError) -> Self {
        match err {
            OllamaError::Network(message) => TempoError::Network(message),
            OllamaError::Api { status, message } => {
                TempoError::Network(format!("ollama returned {status}: {message}"))
            }
            OllamaError::InvalidResponse(message) => TempoError::Internal(message),
        }
    }
}
