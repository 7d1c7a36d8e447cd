//! Cron-based scheduling infrastructure

pub mod error;
pub mod sweep_scheduler;

use std::sync::Arc;

use async_trait::async_trait;
use tempo_core::SweepService;

pub use error::{SchedulerError, SchedulerResult};
pub use sweep_scheduler::{ReminderSweepScheduler, SweepJob, SweepSchedulerConfig};

/// Adapter running a [`SweepService`] as the scheduled job.
pub struct SweepServiceJob {
    sweep: Arc<SweepService>,
}

impl SweepServiceJob {
    pub fn new(sweep: Arc<SweepService>) -> Self {
        Self { sweep }
    }
}

#[async_trait]
impl SweepJob for SweepServiceJob {
    async fn run(&self) -> tempo_domain::Result<usize> {
        self.sweep.run_sweep().await
    }
}
