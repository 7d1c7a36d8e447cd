//! Server-side sweep claimant.
//!
//! Scans the notification store for due, unsent reminders and delivers each
//! at most once. Two sweep passes may run concurrently (overlapping trigger
//! windows); the repository's conditional claim decides a single winner per
//! reminder, and only the winner delivers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tempo_domain::Result;
use tracing::{debug, info, warn};

use super::ports::{DeliveryChannel, NotificationRepository};

/// Sweep service for claiming and delivering due reminders
pub struct SweepService {
    notifications: Arc<dyn NotificationRepository>,
    delivery: Arc<dyn DeliveryChannel>,
}

impl SweepService {
    /// Create a new sweep service
    pub fn new(
        notifications: Arc<dyn NotificationRepository>,
        delivery: Arc<dyn DeliveryChannel>,
    ) -> Self {
        Self { notifications, delivery }
    }

    /// Run one sweep pass against the current instant.
    pub async fn run_sweep(&self) -> Result<usize> {
        self.run_sweep_at(Utc::now()).await
    }

    /// Run one sweep pass against an explicit instant.
    ///
    /// Returns the number of reminders this pass claimed. A reminder lost
    /// to a concurrent claimant is skipped, not an error: the outcome -
    /// delivered exactly once - is still satisfied. A delivery failure is
    /// reported per item and does not abort the rest of the batch; the
    /// claim is not rolled back and delivery is not retried.
    pub async fn run_sweep_at(&self, now: DateTime<Utc>) -> Result<usize> {
        let due = self.notifications.find_due(now).await?;
        debug!(due = due.len(), "sweep found due reminders");

        let mut processed = 0;
        for notification in due {
            if !self.notifications.claim(notification.id).await? {
                debug!(notification_id = %notification.id, "lost claim to concurrent sweep, skipping");
                continue;
            }

            processed += 1;
            if let Err(err) = self
                .delivery
                .show(&notification.title, &notification.message, &notification.event_id.to_string(), true)
                .await
            {
                warn!(notification_id = %notification.id, error = %err, "reminder delivery failed");
            }
        }

        info!(processed, "sweep pass complete");
        Ok(processed)
    }
}
