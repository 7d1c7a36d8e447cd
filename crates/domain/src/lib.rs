//! # Tempo Domain
//!
//! Business domain types and models for Tempo.
//!
//! This crate contains:
//! - Domain data types (CalendarEvent, Notification, BehavioralProfile)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants and temporal utilities
//!
//! ## Architecture
//! - No dependencies on other Tempo crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
// Re-export temporal resolver utilities
pub use utils::temporal::{calculate_end, resolve_date_time, resolve_date_time_from};
