//! Behavioral profile types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_EVENT_DURATION_MINUTES;
use crate::types::event::EventCategory;

/// Event counts over trailing windows, measured from the computing instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MeetingFrequency {
    pub daily: usize,
    pub weekly: usize,
}

/// Per-user summary of historical scheduling habits.
///
/// At most one profile exists per user. It is a snapshot: two profiles
/// computed at different instants may legitimately disagree on the
/// frequency counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehavioralProfile {
    pub user_id: String,
    /// Top start-time slots as "HH:MM", descending frequency.
    pub common_meeting_times: Vec<String>,
    /// Arithmetic mean of event durations, rounded to whole minutes.
    pub average_meeting_duration: i64,
    /// Top collaborators, descending frequency.
    pub frequent_attendees: Vec<String>,
    /// Categories used more than once; never empty.
    pub preferred_categories: Vec<EventCategory>,
    pub meeting_frequency: MeetingFrequency,
    pub last_updated: DateTime<Utc>,
}

impl BehavioralProfile {
    /// Profile returned for users with no event history. Not persisted.
    pub fn default_for(user_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            common_meeting_times: vec!["09:00".to_string(), "14:00".to_string()],
            average_meeting_duration: DEFAULT_EVENT_DURATION_MINUTES,
            frequent_attendees: Vec::new(),
            preferred_categories: vec![EventCategory::Meeting],
            meeting_frequency: MeetingFrequency::default(),
            last_updated: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_has_conventional_slots_and_duration() {
        let profile = BehavioralProfile::default_for("user-1", Utc::now());
        assert_eq!(profile.common_meeting_times, vec!["09:00", "14:00"]);
        assert_eq!(profile.average_meeting_duration, 60);
        assert_eq!(profile.preferred_categories, vec![EventCategory::Meeting]);
        assert!(profile.frequent_attendees.is_empty());
    }
}
