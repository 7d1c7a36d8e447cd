//! Store adapters.
//!
//! Persistent storage is an external collaborator; these in-memory
//! implementations back the server binary and the concurrency tests.

pub mod memory;

pub use memory::{InMemoryEventRepository, InMemoryNotificationRepository, InMemoryProfileRepository};
