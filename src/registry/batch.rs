//! Batch coordinator: sequenced groups of concurrent checks

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use crate::limiter::RateLimiter;
use crate::registry::checker::HandleChecker;
use crate::types::{AvailabilityStatus, CheckConfig, CheckResult};

/// Presentation callbacks emitted while a batch run progresses
///
/// The coordinator never touches rendering; an adapter implements this and
/// draws whatever it likes. All methods default to no-ops.
pub trait BatchEvents: Send + Sync {
    /// One handle settled with an outcome
    fn on_result(&self, _handle: &str, _status: AvailabilityStatus) {}

    /// A group finished: handles settled so far, total attempted, quota left
    fn on_progress(&self, _current: usize, _total: usize, _remaining_quota: u32) {}

    /// The run is halting early because the quota is spent
    fn on_rate_limited(&self, _retry_hint: Option<Duration>) {}

    /// These handles were clamped off before the run and never checked
    fn on_skipped(&self, _handles: &[String]) {}
}

/// Events sink that ignores everything
pub struct NoEvents;

impl BatchEvents for NoEvents {}

/// Aggregated outcome of a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Results for every handle actually checked, in settle order per group
    pub results: Vec<CheckResult>,
    /// Handles skipped up front because quota could not cover them
    pub skipped: Vec<String>,
    /// Whether the run stopped before exhausting its groups
    pub halted_on_rate_limit: bool,
}

impl BatchReport {
    /// Results with the given status
    pub fn with_status(&self, status: AvailabilityStatus) -> Vec<&CheckResult> {
        self.results.iter().filter(|r| r.status == status).collect()
    }
}

/// Runs handles through the checker in bounded concurrent groups
///
/// Groups execute strictly in sequence; concurrency exists only within a
/// group. A rate-limited result anywhere in a group stops the run before
/// the next group starts.
pub struct BatchRunner {
    checker: HandleChecker,
    limiter: Arc<RateLimiter>,
    batch_size: usize,
    batch_delay: Duration,
}

impl BatchRunner {
    pub fn new(checker: HandleChecker, limiter: Arc<RateLimiter>, config: &CheckConfig) -> Self {
        Self {
            checker,
            limiter,
            batch_size: config.batch_size.max(1),
            batch_delay: config.batch_delay,
        }
    }

    /// Check a sequence of handles, delivering results through `events`
    pub async fn run(&self, handles: &[String], events: &dyn BatchEvents) -> BatchReport {
        // Clamp to what the window can still cover; the tail is reported,
        // not attempted
        let quota = self.limiter.remaining() as usize;
        let (attempt, skipped) = if handles.len() > quota {
            handles.split_at(quota)
        } else {
            (handles, &[][..])
        };

        let mut report = BatchReport {
            skipped: skipped.to_vec(),
            ..Default::default()
        };

        if !report.skipped.is_empty() {
            tracing::info!(
                requested = handles.len(),
                quota = quota,
                skipped = report.skipped.len(),
                "Clamped batch to remaining quota"
            );
            events.on_skipped(&report.skipped);
        }

        let total = attempt.len();
        let mut processed = 0;

        for group in attempt.chunks(self.batch_size) {
            let checks = group.iter().map(|handle| self.checker.check(handle));
            let settled = join_all(checks).await;

            let mut group_limited = false;
            for result in settled {
                events.on_result(&result.handle, result.status);
                if result.status == AvailabilityStatus::RateLimited {
                    group_limited = true;
                }
                report.results.push(result);
            }

            processed += group.len();
            events.on_progress(processed, total, self.limiter.remaining());

            if group_limited {
                let retry_hint = self.limiter.check().retry_after();
                tracing::info!(
                    processed = processed,
                    total = total,
                    "Rate limited, halting remaining batches"
                );
                events.on_rate_limited(retry_hint);
                report.halted_on_rate_limit = true;
                break;
            }

            if processed < total {
                tokio::time::sleep(self.batch_delay).await;
            }
        }

        report
    }
}
