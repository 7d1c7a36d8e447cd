//! Session-scoped reminder countdowns.
//!
//! The registry owns at most one pending countdown per event. Its lifetime
//! is tied to the session context: dropping it cancels everything, and a
//! process exit simply loses the pending timers - the server sweep is the
//! durable backstop.
//!
//! A fired countdown invokes the delivery channel but does not mark the
//! shared record sent: the client cannot assume it is the exclusive
//! deliverer, so if a server sweep is live for the same reminder a delivery
//! from each context is possible. That gap is inherited from the observed
//! design and is deliberately left visible rather than silently resolved.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use parking_lot::Mutex;
use tempo_domain::CalendarEvent;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use super::ports::DeliveryChannel;

/// Client-context reminder scheduler, keyed by event identity.
pub struct TimerRegistry {
    delivery: Arc<dyn DeliveryChannel>,
    timers: Arc<Mutex<HashMap<Uuid, JoinHandle<()>>>>,
}

impl TimerRegistry {
    /// Create a registry delivering through the given channel.
    pub fn new(delivery: Arc<dyn DeliveryChannel>) -> Self {
        Self { delivery, timers: Arc::new(Mutex::new(HashMap::new())) }
    }

    /// Arm a countdown firing `lead_minutes` before the event starts.
    ///
    /// A reminder already past due is not armed at all and false is
    /// returned. Arming a key that already has a live countdown cancels
    /// the old one first: last arm wins, never two countdowns per key.
    pub fn arm(&self, event: &CalendarEvent, lead_minutes: i64) -> bool {
        let scheduled_for = event.start_time - Duration::minutes(lead_minutes);
        let delay = scheduled_for - Utc::now();

        if delay <= Duration::zero() {
            debug!(event_id = %event.id, "reminder past due, not arming");
            return false;
        }
        let Ok(delay) = delay.to_std() else {
            return false;
        };

        let event_id = event.id;
        let title = format!("Upcoming: {}", event.title);
        let location = event
            .location
            .as_deref()
            .map(|loc| format!(" at {loc}"))
            .unwrap_or_default();
        let body = format!("Starting in {lead_minutes} minutes{location}");

        let delivery = self.delivery.clone();
        let timers = Arc::clone(&self.timers);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            if let Err(err) = delivery.show(&title, &body, &event_id.to_string(), true).await {
                warn!(%event_id, error = %err, "reminder delivery failed");
            }

            // Fired countdowns release their registry slot themselves.
            timers.lock().remove(&event_id);
        });

        if let Some(previous) = self.timers.lock().insert(event_id, handle) {
            previous.abort();
            debug!(%event_id, "re-armed, previous countdown cancelled");
        }

        true
    }

    /// Cancel a not-yet-fired countdown. Returns whether one was armed.
    pub fn cancel(&self, event_id: Uuid) -> bool {
        match self.timers.lock().remove(&event_id) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Cancel every pending countdown.
    pub fn cancel_all(&self) {
        let mut timers = self.timers.lock();
        for (_, handle) in timers.drain() {
            handle.abort();
        }
    }

    /// Number of currently armed countdowns.
    pub fn armed_count(&self) -> usize {
        self.timers.lock().len()
    }
}

impl Drop for TimerRegistry {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
