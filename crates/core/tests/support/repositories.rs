//! Mock repository implementations for testing

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tempo_core::{EventRepository, NotificationRepository, ProfileRepository};
use tempo_domain::{
    BehavioralProfile, CalendarEvent, Notification, Result as DomainResult, TempoError,
};
use uuid::Uuid;

/// In-memory mock for `EventRepository`.
#[derive(Default, Clone)]
pub struct MockEventRepository {
    events: Arc<Mutex<Vec<CalendarEvent>>>,
}

impl MockEventRepository {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        Self { events: Arc::new(Mutex::new(events)) }
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }
}

#[async_trait]
impl EventRepository for MockEventRepository {
    async fn create(&self, event: CalendarEvent) -> DomainResult<CalendarEvent> {
        self.events.lock().push(event.clone());
        Ok(event)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<CalendarEvent>> {
        Ok(self.events.lock().iter().find(|event| event.id == id).cloned())
    }

    async fn find_by_user(
        &self,
        user_id: &str,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> DomainResult<Vec<CalendarEvent>> {
        let mut events: Vec<CalendarEvent> = self
            .events
            .lock()
            .iter()
            .filter(|event| event.user_id == user_id)
            .filter(|event| match range {
                Some((start, end)) => event.start_time >= start && event.end_time <= end,
                None => true,
            })
            .cloned()
            .collect();
        events.sort_by_key(|event| event.start_time);
        Ok(events)
    }

    async fn find_recent(&self, user_id: &str, limit: usize) -> DomainResult<Vec<CalendarEvent>> {
        let mut events: Vec<CalendarEvent> = self
            .events
            .lock()
            .iter()
            .filter(|event| event.user_id == user_id)
            .cloned()
            .collect();
        events.sort_by_key(|event| std::cmp::Reverse(event.start_time));
        events.truncate(limit);
        Ok(events)
    }

    async fn update(&self, event: CalendarEvent) -> DomainResult<CalendarEvent> {
        let mut events = self.events.lock();
        match events.iter_mut().find(|existing| existing.id == event.id) {
            Some(existing) => {
                *existing = event.clone();
                Ok(event)
            }
            None => Err(TempoError::NotFound(format!("event {}", event.id))),
        }
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.events.lock().retain(|event| event.id != id);
        Ok(())
    }
}

/// In-memory mock for `NotificationRepository`.
///
/// `claim` holds the lock across the check and the write, matching the
/// atomic conditional transition the sweep relies on.
#[derive(Default, Clone)]
pub struct MockNotificationRepository {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl MockNotificationRepository {
    pub fn new(notifications: Vec<Notification>) -> Self {
        Self { notifications: Arc::new(Mutex::new(notifications)) }
    }

    pub fn all(&self) -> Vec<Notification> {
        self.notifications.lock().clone()
    }
}

#[async_trait]
impl NotificationRepository for MockNotificationRepository {
    async fn create(&self, notification: Notification) -> DomainResult<Notification> {
        self.notifications.lock().push(notification.clone());
        Ok(notification)
    }

    async fn find_due(&self, now: DateTime<Utc>) -> DomainResult<Vec<Notification>> {
        Ok(self
            .notifications
            .lock()
            .iter()
            .filter(|notification| notification.is_due(now))
            .cloned()
            .collect())
    }

    async fn claim(&self, id: Uuid) -> DomainResult<bool> {
        let mut notifications = self.notifications.lock();
        match notifications.iter_mut().find(|notification| notification.id == id && !notification.sent) {
            Some(notification) => {
                notification.sent = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_for_user(
        &self,
        user_id: &str,
        unread_only: bool,
        limit: usize,
    ) -> DomainResult<Vec<Notification>> {
        let mut notifications: Vec<Notification> = self
            .notifications
            .lock()
            .iter()
            .filter(|notification| notification.user_id == user_id)
            .filter(|notification| !unread_only || !notification.read)
            .cloned()
            .collect();
        notifications.sort_by_key(|notification| std::cmp::Reverse(notification.created_at));
        notifications.truncate(limit);
        Ok(notifications)
    }

    async fn mark_read(&self, ids: &[Uuid]) -> DomainResult<()> {
        let mut notifications = self.notifications.lock();
        for notification in notifications.iter_mut() {
            if ids.contains(&notification.id) {
                notification.read = true;
            }
        }
        Ok(())
    }
}

/// In-memory mock for `ProfileRepository`.
#[derive(Default, Clone)]
pub struct MockProfileRepository {
    profiles: Arc<Mutex<HashMap<String, BehavioralProfile>>>,
}

impl MockProfileRepository {
    pub fn contains(&self, user_id: &str) -> bool {
        self.profiles.lock().contains_key(user_id)
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
    async fn find_by_user(&self, user_id: &str) -> DomainResult<Option<BehavioralProfile>> {
        Ok(self.profiles.lock().get(user_id).cloned())
    }

    async fn upsert(&self, profile: BehavioralProfile) -> DomainResult<BehavioralProfile> {
        self.profiles.lock().insert(profile.user_id.clone(), profile.clone());
        Ok(profile)
    }
}
