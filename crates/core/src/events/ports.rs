//! Port interfaces for event storage

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tempo_domain::{CalendarEvent, Result};
use uuid::Uuid;

/// Trait for persisting calendar events
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Persist a new event, returning it with identity assigned.
    async fn create(&self, event: CalendarEvent) -> Result<CalendarEvent>;

    /// Get a single event by identity.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CalendarEvent>>;

    /// Events for a user, optionally bounded to a range, ordered by start
    /// ascending.
    async fn find_by_user(
        &self,
        user_id: &str,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<Vec<CalendarEvent>>;

    /// The user's most recent events by start, newest first, capped.
    async fn find_recent(&self, user_id: &str, limit: usize) -> Result<Vec<CalendarEvent>>;

    /// Replace an existing event.
    async fn update(&self, event: CalendarEvent) -> Result<CalendarEvent>;

    /// Delete an event by identity.
    async fn delete(&self, id: Uuid) -> Result<()>;
}
