//! Delivery channel adapters

use async_trait::async_trait;
use tempo_core::DeliveryChannel;
use tempo_domain::Result;
use tracing::info;

/// Delivery channel that writes notifications to the structured log.
///
/// Stands in for a real alert or push transport; delivery is
/// fire-and-forget either way.
#[derive(Default, Clone, Copy)]
pub struct LogDeliveryChannel;

impl LogDeliveryChannel {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DeliveryChannel for LogDeliveryChannel {
    async fn show(
        &self,
        title: &str,
        body: &str,
        tag: &str,
        require_interaction: bool,
    ) -> Result<()> {
        info!(%title, %body, %tag, require_interaction, "notification delivered");
        Ok(())
    }
}
