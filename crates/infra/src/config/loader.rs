//! Configuration loader
//!
//! Loads application configuration from environment variables, applying
//! per-field defaults where a variable is absent.
//!
//! ## Environment Variables
//! - `TEMPO_OLLAMA_URL`: Ollama base URL (default `http://localhost:11434`)
//! - `TEMPO_OLLAMA_MODEL`: Generation model name (default `llama2`)
//! - `TEMPO_CRON_SECRET`: Shared secret for the sweep trigger endpoint
//!   (required)
//! - `TEMPO_SWEEP_CRON`: Sweep cron expression (default every minute)
//! - `TEMPO_BIND_ADDR`: API bind address (default `127.0.0.1:3000`)

use tempo_domain::{Config, OllamaConfig, Result, ServerConfig, SweepConfig, TempoError};

const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
const DEFAULT_OLLAMA_MODEL: &str = "llama2";
const DEFAULT_SWEEP_CRON: &str = "0 * * * * *";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Load configuration from the environment.
///
/// # Errors
/// Returns `TempoError::Config` if `TEMPO_CRON_SECRET` is missing or any
/// present variable has an invalid value.
pub fn load() -> Result<Config> {
    let ollama = OllamaConfig {
        base_url: env_or("TEMPO_OLLAMA_URL", DEFAULT_OLLAMA_URL),
        model: env_or("TEMPO_OLLAMA_MODEL", DEFAULT_OLLAMA_MODEL),
    };

    let secret = std::env::var("TEMPO_CRON_SECRET")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            TempoError::Config("TEMPO_CRON_SECRET must be set for the sweep endpoint".into())
        })?;

    let sweep = SweepConfig { cron_expression: env_or("TEMPO_SWEEP_CRON", DEFAULT_SWEEP_CRON), secret };

    let server = ServerConfig { bind_addr: env_or("TEMPO_BIND_ADDR", DEFAULT_BIND_ADDR) };

    tracing::info!(
        ollama_url = %ollama.base_url,
        model = %ollama.model,
        cron = %sweep.cron_expression,
        bind = %server.bind_addr,
        "Configuration loaded from environment"
    );

    Ok(Config { ollama, sweep, server })
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty()).unwrap_or_else(|| default.to_string())
}
