//! Pattern service - profile lifecycle over the event store

use std::sync::Arc;

use chrono::Utc;
use tempo_domain::constants::{PROFILE_BOOTSTRAP_WINDOW, PROFILE_REFRESH_WINDOW};
use tempo_domain::{BehavioralProfile, Result, TempoError};
use tracing::{debug, info};

use super::engine;
use super::ports::ProfileRepository;
use crate::events::ports::EventRepository;

/// Pattern service for computing and refreshing behavioral profiles
pub struct PatternService {
    events: Arc<dyn EventRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl PatternService {
    /// Create a new pattern service
    pub fn new(events: Arc<dyn EventRepository>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { events, profiles }
    }

    /// Get the user's profile, computing it lazily on first request.
    ///
    /// A user with no history gets the default profile, which is returned
    /// but not persisted; the first persisted profile comes from a
    /// non-empty bootstrap or an explicit [`refresh`](Self::refresh).
    pub async fn get_or_create(&self, user_id: &str) -> Result<BehavioralProfile> {
        if let Some(profile) = self.profiles.find_by_user(user_id).await? {
            return Ok(profile);
        }

        let history = self.events.find_recent(user_id, PROFILE_BOOTSTRAP_WINDOW).await?;
        if history.is_empty() {
            debug!(user_id, "no event history, returning default profile");
            return Ok(BehavioralProfile::default_for(user_id, Utc::now()));
        }

        let profile = engine::compute_profile(user_id, &history, Utc::now());
        info!(user_id, events = history.len(), "bootstrapped behavioral profile");
        self.profiles.upsert(profile).await
    }

    /// Re-fold the profile over a larger recent window and persist it.
    ///
    /// # Errors
    /// `NotFound` when the user has no events at all.
    pub async fn refresh(&self, user_id: &str) -> Result<BehavioralProfile> {
        let history = self.events.find_recent(user_id, PROFILE_REFRESH_WINDOW).await?;
        if history.is_empty() {
            return Err(TempoError::NotFound(format!("no events found for user {user_id}")));
        }

        let now = Utc::now();
        let profile = match self.profiles.find_by_user(user_id).await? {
            Some(existing) => engine::update_profile(&existing, &history, now),
            None => engine::compute_profile(user_id, &history, now),
        };

        info!(user_id, events = history.len(), "refreshed behavioral profile");
        self.profiles.upsert(profile).await
    }
}
