//! Notification types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::event::CalendarEvent;

/// Kind of notification record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Reminder,
    Created,
    Updated,
    Cancelled,
}

/// A notification record shared between the client timer context and the
/// server sweep context.
///
/// Invariant: `sent` only ever transitions `false -> true`, and that
/// transition is the atomic claim preventing duplicate delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: String,
    pub event_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub read: bool,
    /// Present only on reminder notifications.
    pub scheduled_for: Option<DateTime<Utc>>,
    pub sent: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Instant "event created" notification; marked sent on creation.
    pub fn created(event: &CalendarEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: event.user_id.clone(),
            event_id: event.id,
            kind: NotificationKind::Created,
            title: "Event Created".to_string(),
            message: format!(
                "{} scheduled for {}",
                event.title,
                event.start_time.format("%b %-d, %-I:%M %p")
            ),
            read: false,
            scheduled_for: None,
            sent: true,
            created_at: Utc::now(),
        }
    }

    /// Reminder notification scheduled ahead of the event start.
    pub fn reminder(event: &CalendarEvent, scheduled_for: DateTime<Utc>, lead_minutes: i64) -> Self {
        let location = event
            .location
            .as_deref()
            .map(|loc| format!(" at {loc}"))
            .unwrap_or_default();

        Self {
            id: Uuid::new_v4(),
            user_id: event.user_id.clone(),
            event_id: event.id,
            kind: NotificationKind::Reminder,
            title: format!("Upcoming: {}", event.title),
            message: format!("Starting in {lead_minutes} minutes{location}"),
            read: false,
            scheduled_for: Some(scheduled_for),
            sent: false,
            created_at: Utc::now(),
        }
    }

    /// Whether this reminder is due at the given instant and still unsent.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        !self.sent && self.scheduled_for.is_some_and(|at| at <= now)
    }
}
