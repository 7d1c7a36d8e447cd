//! Free-text event extraction

pub mod fallback;
pub mod ports;
pub mod prompts;
pub mod service;

pub use service::{ExtractionOutcome, ExtractionService};
