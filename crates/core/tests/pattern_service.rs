//! Profile lifecycle: lazy bootstrap, defaults, and refresh.

mod support;

use std::sync::Arc;

use chrono::{Duration, Utc};
use support::repositories::{MockEventRepository, MockProfileRepository};
use tempo_core::PatternService;
use tempo_domain::{CalendarEvent, EventCategory, EventDraft, TempoError};

fn event(hours_ago: i64, category: EventCategory) -> CalendarEvent {
    let start = Utc::now() - Duration::hours(hours_ago);
    CalendarEvent::from_draft(
        "user-1",
        EventDraft {
            title: "event".to_string(),
            description: None,
            start_time: start,
            end_time: start + Duration::minutes(30),
            location: None,
            attendees: vec!["ana".to_string()],
            category,
            confidence: 0.8,
        },
    )
}

#[tokio::test]
async fn first_request_bootstraps_and_persists_a_profile() {
    let events = MockEventRepository::new(vec![
        event(2, EventCategory::Work),
        event(26, EventCategory::Work),
        event(50, EventCategory::Task),
    ]);
    let profiles = MockProfileRepository::default();
    let service = PatternService::new(Arc::new(events), Arc::new(profiles.clone()));

    let profile = service.get_or_create("user-1").await.expect("bootstraps");
    assert!(profiles.contains("user-1"));
    assert!(profile.preferred_categories.contains(&EventCategory::Work));
    assert_eq!(profile.average_meeting_duration, 30);
    assert_eq!(profile.frequent_attendees, vec!["ana"]);
}

#[tokio::test]
async fn empty_history_returns_default_without_persisting() {
    let profiles = MockProfileRepository::default();
    let service =
        PatternService::new(Arc::new(MockEventRepository::default()), Arc::new(profiles.clone()));

    let profile = service.get_or_create("user-1").await.expect("default");
    assert_eq!(profile.common_meeting_times, vec!["09:00", "14:00"]);
    assert_eq!(profile.average_meeting_duration, 60);
    assert!(!profiles.contains("user-1"));
}

#[tokio::test]
async fn second_request_reuses_the_stored_profile() {
    let events = MockEventRepository::new(vec![event(2, EventCategory::Work)]);
    let profiles = MockProfileRepository::default();
    let service = PatternService::new(Arc::new(events), Arc::new(profiles));

    let first = service.get_or_create("user-1").await.expect("bootstraps");
    let second = service.get_or_create("user-1").await.expect("reuses");
    assert_eq!(first, second);
}

#[tokio::test]
async fn refresh_recomputes_over_recent_history() {
    let events = MockEventRepository::new(vec![
        event(1, EventCategory::Personal),
        event(3, EventCategory::Personal),
    ]);
    let profiles = MockProfileRepository::default();
    let service = PatternService::new(Arc::new(events), Arc::new(profiles.clone()));

    service.get_or_create("user-1").await.expect("bootstraps");
    let refreshed = service.refresh("user-1").await.expect("refreshes");

    assert!(profiles.contains("user-1"));
    assert_eq!(refreshed.preferred_categories, vec![EventCategory::Personal]);
    assert_eq!(refreshed.meeting_frequency.weekly, 2);
}

#[tokio::test]
async fn refresh_without_any_events_is_not_found() {
    let service = PatternService::new(
        Arc::new(MockEventRepository::default()),
        Arc::new(MockProfileRepository::default()),
    );

    assert!(matches!(service.refresh("user-1").await, Err(TempoError::NotFound(_))));
}
