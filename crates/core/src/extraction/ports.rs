//! Port interfaces for event extraction

use async_trait::async_trait;
use tempo_domain::Result;

/// Trait for the text generation backend that powers extraction.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Cheap reachability probe; must not attempt generation.
    async fn health_check(&self) -> bool;

    /// Generate raw text for a prompt. The output is untrusted and may be
    /// arbitrarily malformed.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
