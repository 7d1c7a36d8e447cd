//! Calendar event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::DEFAULT_EVENT_TITLE;

/// Closed set of event categories.
///
/// Values outside the set coerce to [`EventCategory::Meeting`] rather than
/// erroring; extraction output is untrusted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    #[default]
    Meeting,
    Task,
    Reminder,
    Personal,
    Work,
}

impl EventCategory {
    /// Parse a category, coercing unknown or empty values to `Meeting`.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "meeting" => Self::Meeting,
            "task" => Self::Task,
            "reminder" => Self::Reminder,
            "personal" => Self::Personal,
            "work" => Self::Work,
            _ => Self::Meeting,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Meeting => "meeting",
            Self::Task => "task",
            Self::Reminder => "reminder",
            Self::Personal => "personal",
            Self::Work => "work",
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// Structured event draft produced by extraction, before persistence.
///
/// Invariant: `end_time >= start_time`. The end instant is always derived
/// from the start plus a duration, never stored independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: Option<String>,
    /// De-duplicated case-insensitively, first-seen order preserved.
    pub attendees: Vec<String>,
    pub category: EventCategory,
    /// Extraction confidence in `[0, 1]`.
    pub confidence: f32,
}

impl EventDraft {
    /// De-duplicate attendees case-insensitively, keeping first-seen order
    /// and original casing.
    pub fn dedup_attendees(attendees: Vec<String>) -> Vec<String> {
        let mut seen = Vec::new();
        let mut result = Vec::new();
        for attendee in attendees {
            let trimmed = attendee.trim();
            if trimmed.is_empty() {
                continue;
            }
            let key = trimmed.to_lowercase();
            if !seen.contains(&key) {
                seen.push(key);
                result.push(trimmed.to_string());
            }
        }
        result
    }
}

/// Persisted calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: Option<String>,
    pub attendees: Vec<String>,
    pub category: EventCategory,
    pub priority: EventPriority,
    /// Recurring events are flagged but never expanded into instances.
    pub is_recurring: bool,
    pub recurring_pattern: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CalendarEvent {
    /// Materialize a draft into a persistable event for a user.
    pub fn from_draft(user_id: impl Into<String>, draft: EventDraft) -> Self {
        let now = Utc::now();
        let title = if draft.title.trim().is_empty() {
            DEFAULT_EVENT_TITLE.to_string()
        } else {
            draft.title
        };

        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            title,
            description: draft.description,
            start_time: draft.start_time,
            end_time: draft.end_time.max(draft.start_time),
            location: draft.location,
            attendees: EventDraft::dedup_attendees(draft.attendees),
            category: draft.category,
            priority: EventPriority::default(),
            is_recurring: false,
            recurring_pattern: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Event duration in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Whether the event is in progress at the given instant.
    pub fn is_happening_at(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start_time && instant <= self.end_time
    }
}
