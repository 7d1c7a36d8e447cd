//! Port interfaces for behavioral profiles

use async_trait::async_trait;
use tempo_domain::{BehavioralProfile, Result};

/// Trait for persisting behavioral profiles; at most one per user.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Get the profile for a user, if one has been computed.
    async fn find_by_user(&self, user_id: &str) -> Result<Option<BehavioralProfile>>;

    /// Insert or replace the user's profile.
    async fn upsert(&self, profile: BehavioralProfile) -> Result<BehavioralProfile>;
}
