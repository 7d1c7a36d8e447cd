//! # Tempo Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Free-text event extraction with a degraded fallback path
//! - Pattern learning over a user's event history
//! - The dual-sided notification scheduler (timer registry + sweep)
//! - Port/adapter interfaces (traits)
//!
//! ## Architecture Principles
//! - Only depends on `tempo-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod events;
pub mod extraction;
pub mod notifications;
pub mod patterns;

// Re-export specific items to avoid ambiguity
pub use events::ports::EventRepository;
pub use events::EventService;
pub use extraction::ports::GenerationBackend;
pub use extraction::{ExtractionOutcome, ExtractionService};
pub use notifications::ports::{DeliveryChannel, NotificationRepository};
pub use notifications::{SweepService, TimerRegistry};
pub use patterns::ports::ProfileRepository;
pub use patterns::PatternService;
