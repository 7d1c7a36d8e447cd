//! Pattern learning engine - pure folds over event history.
//!
//! Both entry points are deterministic: frequency ties break by
//! first-encountered order, so equal inputs always produce equal profiles.
//! The daily/weekly counts are measured against the supplied `now`, which
//! makes a profile a snapshot, not a stream aggregate.

use chrono::{DateTime, Duration, Utc};
use tempo_domain::constants::{
    COMMON_TIME_SLOT_LIMIT, DEFAULT_EVENT_DURATION_MINUTES, FREQUENT_ATTENDEE_LIMIT,
};
use tempo_domain::{BehavioralProfile, CalendarEvent, EventCategory, MeetingFrequency};

/// Compute a fresh profile from a user's event history.
pub fn compute_profile(
    user_id: &str,
    events: &[CalendarEvent],
    now: DateTime<Utc>,
) -> BehavioralProfile {
    let common_meeting_times = top_counted(
        events.iter().map(|event| event.start_time.format("%H:%M").to_string()),
        COMMON_TIME_SLOT_LIMIT,
    );

    let frequent_attendees = top_counted(
        events.iter().flat_map(|event| event.attendees.iter().cloned()),
        FREQUENT_ATTENDEE_LIMIT,
    );

    let preferred_categories = preferred_categories(events);

    BehavioralProfile {
        user_id: user_id.to_string(),
        common_meeting_times,
        average_meeting_duration: average_duration(events),
        frequent_attendees,
        preferred_categories,
        meeting_frequency: frequency(events, now),
        last_updated: now,
    }
}

/// Recompute a profile from a (typically larger) recent window.
///
/// A full recompute rather than a delta merge: recency windowing bounds the
/// cost, and the result replaces the old profile wholesale.
pub fn update_profile(
    profile: &BehavioralProfile,
    events: &[CalendarEvent],
    now: DateTime<Utc>,
) -> BehavioralProfile {
    compute_profile(&profile.user_id, events, now)
}

/// Count keys preserving first-seen order, then take the `limit` most
/// frequent. The sort is stable, so ties keep first-seen order.
fn top_counted(keys: impl Iterator<Item = String>, limit: usize) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();

    for key in keys {
        match counts.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, count)) => *count += 1,
            None => counts.push((key, 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(limit).map(|(key, _)| key).collect()
}

fn average_duration(events: &[CalendarEvent]) -> i64 {
    if events.is_empty() {
        return DEFAULT_EVENT_DURATION_MINUTES;
    }

    let total: f64 = events
        .iter()
        .map(|event| (event.end_time - event.start_time).num_seconds() as f64 / 60.0)
        .sum();

    (total / events.len() as f64).round() as i64
}

/// Categories used more than once, descending frequency. Never empty: an
/// empty preference set would be indistinguishable from "never computed".
fn preferred_categories(events: &[CalendarEvent]) -> Vec<EventCategory> {
    let mut counts: Vec<(EventCategory, usize)> = Vec::new();

    for event in events {
        match counts.iter_mut().find(|(existing, _)| *existing == event.category) {
            Some((_, count)) => *count += 1,
            None => counts.push((event.category, 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    let preferred: Vec<EventCategory> =
        counts.into_iter().filter(|(_, count)| *count > 1).map(|(category, _)| category).collect();

    if preferred.is_empty() {
        vec![EventCategory::default()]
    } else {
        preferred
    }
}

fn frequency(events: &[CalendarEvent], now: DateTime<Utc>) -> MeetingFrequency {
    let day_ago = now - Duration::days(1);
    let week_ago = now - Duration::days(7);

    MeetingFrequency {
        daily: events.iter().filter(|event| event.start_time >= day_ago).count(),
        weekly: events.iter().filter(|event| event.start_time >= week_ago).count(),
    }
}
