//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

/// Default event duration in minutes when none is extracted.
pub const DEFAULT_EVENT_DURATION_MINUTES: i64 = 60;

/// How long before an event's start its reminder is scheduled.
pub const REMINDER_LEAD_MINUTES: i64 = 15;

/// Confidence assigned when the backend parses cleanly but omits a score.
pub const DEFAULT_CONFIDENCE: f32 = 0.8;

/// Confidence pinned on drafts recovered through the fallback matcher.
pub const DEGRADED_CONFIDENCE: f32 = 0.5;

/// Placeholder title for events extracted without one.
pub const DEFAULT_EVENT_TITLE: &str = "Untitled Event";

// Pattern learning windows
pub const PROFILE_BOOTSTRAP_WINDOW: usize = 50;
pub const PROFILE_REFRESH_WINDOW: usize = 100;
pub const COMMON_TIME_SLOT_LIMIT: usize = 5;
pub const FREQUENT_ATTENDEE_LIMIT: usize = 10;

/// Maximum notifications returned by a user feed query.
pub const NOTIFICATION_FEED_LIMIT: usize = 20;
