//! The recurring deadline sweep: Open postings whose deadline has elapsed
//! are moved to Closed. Between ticks a just-expired posting stays visible
//! to status-only searches; that staleness is bounded by the sweep interval.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::marketplace::storage::StorageError;

use super::domain::JobStatus;
use super::repository::JobRepository;

/// Outcome of one sweep pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepSummary {
    pub examined: usize,
    pub closed: usize,
    pub failures: usize,
}

/// Close every Open job whose deadline is at or before `now`.
///
/// Rows are updated independently, not as one transaction: a row that fails
/// is logged and counted while the rest of the batch proceeds, and the next
/// tick retries whatever is still open.
pub fn close_expired<J: JobRepository>(
    jobs: &J,
    now: DateTime<Utc>,
) -> Result<SweepSummary, StorageError> {
    let expired = jobs.expired_open(now)?;
    let mut summary = SweepSummary {
        examined: expired.len(),
        ..SweepSummary::default()
    };

    for job in expired {
        match jobs.set_status(&job.id, JobStatus::Closed, now) {
            Ok(()) => summary.closed += 1,
            Err(error) => {
                warn!(job_id = %job.id.0, %error, "failed to close expired job");
                summary.failures += 1;
            }
        }
    }

    Ok(summary)
}

/// Recurring sweep task with explicit shutdown.
pub struct DeadlineSweeper<J> {
    jobs: Arc<J>,
    period: Duration,
}

impl<J> DeadlineSweeper<J>
where
    J: JobRepository + 'static,
{
    pub fn new(jobs: Arc<J>, period: Duration) -> Self {
        Self { jobs, period }
    }

    /// Tick until the shutdown channel flips (or its sender drops). An
    /// in-flight tick always finishes before the loop exits; a failed tick
    /// is logged and retried on the next one.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match close_expired(self.jobs.as_ref(), Utc::now()) {
                        Ok(summary) if summary.examined > 0 => {
                            info!(
                                closed = summary.closed,
                                failures = summary.failures,
                                "deadline sweep closed expired jobs"
                            );
                        }
                        Ok(_) => {}
                        Err(error) => warn!(%error, "deadline sweep tick failed"),
                    }
                }
                _ = shutdown.changed() => {
                    info!("deadline sweeper stopping");
                    break;
                }
            }
        }
    }
}
