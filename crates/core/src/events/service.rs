//! Event service - persistence glue and notification side effects

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tempo_domain::constants::REMINDER_LEAD_MINUTES;
use tempo_domain::{CalendarEvent, EventDraft, Notification, Result, TempoError};
use tracing::{debug, info};
use uuid::Uuid;

use super::ports::EventRepository;
use crate::notifications::ports::NotificationRepository;
use crate::notifications::TimerRegistry;

/// Event service for persisting drafts and maintaining their notifications
pub struct EventService {
    events: Arc<dyn EventRepository>,
    notifications: Arc<dyn NotificationRepository>,
    timers: Option<Arc<TimerRegistry>>,
}

impl EventService {
    /// Create a new event service
    pub fn new(
        events: Arc<dyn EventRepository>,
        notifications: Arc<dyn NotificationRepository>,
    ) -> Self {
        Self { events, notifications, timers: None }
    }

    /// Attach a session timer registry so edits and deletions cancel any
    /// armed countdown for the event.
    pub fn with_timer_registry(mut self, timers: Arc<TimerRegistry>) -> Self {
        self.timers = Some(timers);
        self
    }

    /// Persist a draft for a user, writing its notifications.
    ///
    /// Two independent writes follow event creation: an instant "created"
    /// notification, then a reminder scheduled at start minus the lead
    /// time. A reminder whose schedule is already past is never created.
    /// There is no transaction across the writes: a failed reminder write
    /// propagates, but the event and the created-notification stand.
    pub async fn create(&self, user_id: &str, draft: EventDraft) -> Result<CalendarEvent> {
        let event = self.events.create(CalendarEvent::from_draft(user_id, draft)).await?;
        info!(event_id = %event.id, user_id, title = %event.title, "event created");

        self.notifications.create(Notification::created(&event)).await?;

        let reminder_time = event.start_time - Duration::minutes(REMINDER_LEAD_MINUTES);
        if reminder_time > Utc::now() {
            self.notifications
                .create(Notification::reminder(&event, reminder_time, REMINDER_LEAD_MINUTES))
                .await?;
            debug!(event_id = %event.id, scheduled_for = %reminder_time, "reminder scheduled");
        } else {
            debug!(event_id = %event.id, "event too close, no reminder created");
        }

        Ok(event)
    }

    /// Get a single event.
    pub async fn get(&self, id: Uuid) -> Result<CalendarEvent> {
        self.events
            .find_by_id(id)
            .await?
            .ok_or_else(|| TempoError::NotFound(format!("event {id}")))
    }

    /// Events for a user ordered by start, optionally bounded to a range.
    pub async fn list(
        &self,
        user_id: &str,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<Vec<CalendarEvent>> {
        self.events.find_by_user(user_id, range).await
    }

    /// Replace an event, cancelling any armed countdown for it.
    pub async fn update(&self, mut event: CalendarEvent) -> Result<CalendarEvent> {
        if self.events.find_by_id(event.id).await?.is_none() {
            return Err(TempoError::NotFound(format!("event {}", event.id)));
        }

        self.cancel_timer(event.id);
        event.updated_at = Utc::now();
        self.events.update(event).await
    }

    /// Delete an event, cancelling any armed countdown for it.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if self.events.find_by_id(id).await?.is_none() {
            return Err(TempoError::NotFound(format!("event {id}")));
        }

        self.cancel_timer(id);
        self.events.delete(id).await
    }

    fn cancel_timer(&self, event_id: Uuid) {
        if let Some(timers) = &self.timers {
            if timers.cancel(event_id) {
                debug!(%event_id, "cancelled armed reminder countdown");
            }
        }
    }
}
