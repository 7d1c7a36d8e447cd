//! Dual-sided notification scheduling.
//!
//! Two claimants can race on the same reminder: the session-scoped
//! [`TimerRegistry`] and the server-side [`SweepService`]. The shared
//! notification store is the only resource crossing the two contexts, and
//! the repository's conditional claim is the atomic unit that keeps
//! sweep-vs-sweep delivery at-most-once.

pub mod ports;
pub mod sweep;
pub mod timer_registry;

pub use sweep::SweepService;
pub use timer_registry::TimerRegistry;
