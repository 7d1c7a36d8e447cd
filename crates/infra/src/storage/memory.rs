//! In-memory repository adapters.
//!
//! Each adapter guards its records with a single mutex; `claim` performs
//! its check and write inside one critical section, which is what makes it
//! the atomic conditional transition the sweep protocol requires.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tempo_core::{EventRepository, NotificationRepository, ProfileRepository};
use tempo_domain::{BehavioralProfile, CalendarEvent, Notification, Result, TempoError};
use uuid::Uuid;

/// In-memory `EventRepository` adapter.
#[derive(Default, Clone)]
pub struct InMemoryEventRepository {
    events: Arc<Mutex<Vec<CalendarEvent>>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn create(&self, event: CalendarEvent) -> Result<CalendarEvent> {
        self.events.lock().push(event.clone());
        Ok(event)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CalendarEvent>> {
        Ok(self.events.lock().iter().find(|event| event.id == id).cloned())
    }

    async fn find_by_user(
        &self,
        user_id: &str,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<Vec<CalendarEvent>> {
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

    async fn find_recent(&self, user_id: &str, limit: usize) -> Result<Vec<CalendarEvent>> {
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

    async fn update(&self, event: CalendarEvent) -> Result<CalendarEvent> {
        let mut events = self.events.lock();
        match events.iter_mut().find(|existing| existing.id == event.id) {
            Some(existing) => {
                *existing = event.clone();
                Ok(event)
            }
            None => Err(TempoError::NotFound(format!("event {}", event.id))),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut events = self.events.lock();
        let before = events.len();
        events.retain(|event| event.id != id);
        if events.len() == before {
            return Err(TempoError::NotFound(format!("event {id}")));
        }
        Ok(())
    }
}

/// In-memory `NotificationRepository` adapter.
#[derive(Default, Clone)]
pub struct InMemoryNotificationRepository {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored record, for assertions in tests.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.notifications.lock().clone()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn create(&self, notification: Notification) -> Result<Notification> {
        self.notifications.lock().push(notification.clone());
        Ok(notification)
    }

    async fn find_due(&self, now: DateTime<Utc>) -> Result<Vec<Notification>> {
        Ok(self
            .notifications
            .lock()
            .iter()
            .filter(|notification| notification.is_due(now))
            .cloned()
            .collect())
    }

    async fn claim(&self, id: Uuid) -> Result<bool> {
        // Check and write under one lock: the claim must be atomic with
        // respect to concurrent sweeps.
        let mut notifications = self.notifications.lock();
        match notifications.iter_mut().find(|notification| notification.id == id && !notification.sent)
        {
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
    ) -> Result<Vec<Notification>> {
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

    async fn mark_read(&self, ids: &[Uuid]) -> Result<()> {
        let mut notifications = self.notifications.lock();
        for notification in notifications.iter_mut() {
            if ids.contains(&notification.id) {
                notification.read = true;
            }
        }
        Ok(())
    }
}

/// In-memory `ProfileRepository` adapter.
#[derive(Default, Clone)]
pub struct InMemoryProfileRepository {
    profiles: Arc<Mutex<HashMap<String, BehavioralProfile>>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_user(&self, user_id: &str) -> Result<Option<BehavioralProfile>> {
        Ok(self.profiles.lock().get(user_id).cloned())
    }

    async fn upsert(&self, profile: BehavioralProfile) -> Result<BehavioralProfile> {
        self.profiles.lock().insert(profile.user_id.clone(), profile.clone());
        Ok(profile)
    }
}
