//! Mock delivery channels for testing

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tempo_core::DeliveryChannel;
use tempo_domain::Result as DomainResult;

/// Delivery channel that records every shown notification.
#[derive(Default)]
pub struct RecordingChannel {
    shown: AtomicUsize,
    titles: Mutex<Vec<String>>,
}

impl RecordingChannel {
    pub fn shown(&self) -> usize {
        self.shown.load(Ordering::SeqCst)
    }

    pub fn titles(&self) -> Vec<String> {
        self.titles.lock().clone()
    }
}

#[async_trait]
impl DeliveryChannel for RecordingChannel {
    async fn show(
        &self,
        title: &str,
        _body: &str,
        _tag: &str,
        _require_interaction: bool,
    ) -> DomainResult<()> {
        self.shown.fetch_add(1, Ordering::SeqCst);
        self.titles.lock().push(title.to_string());
        Ok(())
    }
}
