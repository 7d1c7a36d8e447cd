//! Port interfaces for notification storage and delivery

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tempo_domain::{Notification, Result};
use uuid::Uuid;

/// Trait for persisting notifications
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Persist a new notification.
    async fn create(&self, notification: Notification) -> Result<Notification>;

    /// All unsent reminders whose schedule has elapsed.
    async fn find_due(&self, now: DateTime<Utc>) -> Result<Vec<Notification>>;

    /// Atomic conditional claim: transition `sent` from false to true.
    ///
    /// Returns true only for the claimant that performed the transition;
    /// a false return means another claimant already owns delivery. The
    /// check and the write must be a single atomic step - a read followed
    /// by a blind write is unsafe under concurrent sweeps.
    async fn claim(&self, id: Uuid) -> Result<bool>;

    /// A user's notification feed, newest first, capped at `limit`.
    async fn find_for_user(
        &self,
        user_id: &str,
        unread_only: bool,
        limit: usize,
    ) -> Result<Vec<Notification>>;

    /// Mark the given notifications read.
    async fn mark_read(&self, ids: &[Uuid]) -> Result<()>;
}

/// Trait for the user-facing delivery channel (alert, push, or log).
///
/// Fire-and-forget: callers report failures but never retry within the
/// same pass, and no return value beyond success is relied upon.
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    async fn show(
        &self,
        title: &str,
        body: &str,
        tag: &str,
        require_interaction: bool,
    ) -> Result<()>;
}
