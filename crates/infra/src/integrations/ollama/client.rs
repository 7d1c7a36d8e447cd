/// Ollama API client backing free-text event extraction
use async_trait::async_trait;
use reqwest::Method;
use tempo_core::GenerationBackend;
use tempo_domain::Result;
use tracing::{debug, info};

use crate::http::HttpClient;

use super::types::{GenerateRequest, GenerateResponse, OllamaError};

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "llama2";

/// Client for a locally running Ollama daemon
pub struct OllamaClient {
    http_client: HttpClient,
    base_url: String,
    model: String,
}

impl OllamaClient {
    /// Create a new Ollama client
    ///
    /// # Arguments
    /// * `http_client` - HTTP client with retry logic
    pub fn new(http_client: HttpClient) -> Self {
        Self {
            http_client,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Override the daemon base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the model passed on generate requests.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    async fn generate_raw(&self, prompt: &str) -> std::result::Result<String, OllamaError> {
        let payload = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
        };

        let builder = self
            .http_client
            .request(Method::POST, format!("{}/api/generate", self.base_url))
            .header("Content-Type", "application/json")
            .json(&payload);

        let response = self
            .http_client
            .send(builder)
            .await
            .map_err(|err| OllamaError::Network(err.to_string()))?;

        let status = response.status();
        debug!(status = status.as_u16(), model = %self.model, "received Ollama response");

        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(OllamaError::Api { status: status.as_u16(), message });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|err| OllamaError::InvalidResponse(format!("Failed to parse response: {err}")))?;

        info!(model = %body.model, done = body.done, "Ollama generation complete");
        Ok(body.response)
    }
}

#[async_trait]
impl GenerationBackend for OllamaClient {
    /// Probe `GET /api/tags`; any transport error reads as unreachable.
    async fn health_check(&self) -> bool {
        let builder = self.http_client.request(Method::GET, format!("{}/api/tags", self.base_url));

        match self.http_client.send(builder).await {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                debug!(error = %err, "Ollama health check failed");
                false
            }
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        Ok(self.generate_raw(prompt).await?)
    }
}
