//! Pattern learning over a user's event history

pub mod engine;
pub mod ports;
pub mod service;

pub use engine::{compute_profile, update_profile};
pub use service::PatternService;
