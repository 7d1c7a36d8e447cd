//! Event creation, its notification side effects, and timer cleanup.

mod support;

use std::sync::Arc;

use chrono::{Duration, Utc};
use support::channels::RecordingChannel;
use support::repositories::{MockEventRepository, MockNotificationRepository};
use tempo_core::{EventService, TimerRegistry};
use tempo_domain::{EventCategory, EventDraft, NotificationKind, TempoError};

fn draft(start_in_minutes: i64) -> EventDraft {
    let start = Utc::now() + Duration::minutes(start_in_minutes);
    EventDraft {
        title: "Team Sync".to_string(),
        description: Some("weekly".to_string()),
        start_time: start,
        end_time: start + Duration::minutes(45),
        location: Some("Room 4".to_string()),
        attendees: vec!["John".to_string(), "Sarah".to_string()],
        category: EventCategory::Meeting,
        confidence: 0.9,
    }
}

#[tokio::test]
async fn create_writes_created_and_reminder_notifications() {
    let events = MockEventRepository::default();
    let notifications = MockNotificationRepository::default();
    let service = EventService::new(Arc::new(events.clone()), Arc::new(notifications.clone()));

    let event = service.create("user-1", draft(120)).await.expect("creates");
    assert_eq!(events.len(), 1);

    let records = notifications.all();
    assert_eq!(records.len(), 2);

    let created = records.iter().find(|n| n.kind == NotificationKind::Created).expect("created");
    assert!(created.sent);
    assert!(created.scheduled_for.is_none());

    let reminder = records.iter().find(|n| n.kind == NotificationKind::Reminder).expect("reminder");
    assert!(!reminder.sent);
    assert_eq!(
        reminder.scheduled_for.expect("scheduled"),
        event.start_time - Duration::minutes(15)
    );
    assert_eq!(reminder.message, "Starting in 15 minutes at Room 4");
}

#[tokio::test]
async fn imminent_event_gets_no_reminder_at_all() {
    let notifications = MockNotificationRepository::default();
    let service =
        EventService::new(Arc::new(MockEventRepository::default()), Arc::new(notifications.clone()));

    // Starts in 10 minutes; the 15-minute lead is already past.
    service.create("user-1", draft(10)).await.expect("creates");

    let records = notifications.all();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, NotificationKind::Created);
}

#[tokio::test]
async fn delete_cancels_the_armed_countdown() {
    let events = MockEventRepository::default();
    let notifications = MockNotificationRepository::default();
    let registry = Arc::new(TimerRegistry::new(Arc::new(RecordingChannel::default())));
    let service = EventService::new(Arc::new(events.clone()), Arc::new(notifications))
        .with_timer_registry(registry.clone());

    let event = service.create("user-1", draft(120)).await.expect("creates");
    registry.arm(&event, 15);
    assert_eq!(registry.armed_count(), 1);

    service.delete(event.id).await.expect("deletes");
    assert_eq!(registry.armed_count(), 0);
    assert_eq!(events.len(), 0);
}

#[tokio::test]
async fn update_cancels_the_countdown_and_bumps_updated_at() {
    let events = MockEventRepository::default();
    let notifications = MockNotificationRepository::default();
    let registry = Arc::new(TimerRegistry::new(Arc::new(RecordingChannel::default())));
    let service = EventService::new(Arc::new(events.clone()), Arc::new(notifications))
        .with_timer_registry(registry.clone());

    let mut event = service.create("user-1", draft(120)).await.expect("creates");
    registry.arm(&event, 15);

    event.title = "Team Sync (moved)".to_string();
    let before = event.updated_at;
    let updated = service.update(event).await.expect("updates");

    assert_eq!(registry.armed_count(), 0);
    assert_eq!(updated.title, "Team Sync (moved)");
    assert!(updated.updated_at >= before);
}

#[tokio::test]
async fn operations_on_missing_events_are_not_found() {
    let service = EventService::new(
        Arc::new(MockEventRepository::default()),
        Arc::new(MockNotificationRepository::default()),
    );

    let missing = uuid::Uuid::new_v4();
    assert!(matches!(service.get(missing).await, Err(TempoError::NotFound(_))));
    assert!(matches!(service.delete(missing).await, Err(TempoError::NotFound(_))));
}
