//! Configuration structures
//!
//! Populated by the infra config loader; see `tempo-infra::config`.

use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub ollama: OllamaConfig,
    pub sweep: SweepConfig,
    pub server: ServerConfig,
}

/// Generation backend (Ollama) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Base URL of the Ollama daemon, e.g. `http://localhost:11434`
    pub base_url: String,
    /// Model name passed on every generate request
    pub model: String,
}

/// Reminder sweep settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Cron expression driving the periodic sweep
    pub cron_expression: String,
    /// Shared secret required by the sweep trigger endpoint
    pub secret: String,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the API server binds to, e.g. `127.0.0.1:3000`
    pub bind_addr: String,
}
