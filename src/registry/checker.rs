//! Handle availability checker

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use crate::limiter::{AcquireDecision, RateLimiter};
use crate::registry::{RegistryAnswer, RegistryLookup};
use crate::stats::StatsRecorder;
use crate::types::{AvailabilityStatus, CheckResult};

/// Availability checker for a single handle
///
/// One lookup per call, no internal retry. Every failure path resolves to
/// an outcome value; this never returns an error to its caller.
pub struct HandleChecker {
    registry: Arc<dyn RegistryLookup>,
    limiter: Arc<RateLimiter>,
    stats: Arc<StatsRecorder>,
}

impl HandleChecker {
    pub fn new(
        registry: Arc<dyn RegistryLookup>,
        limiter: Arc<RateLimiter>,
        stats: Arc<StatsRecorder>,
    ) -> Self {
        Self {
            registry,
            limiter,
            stats,
        }
    }

    /// Check one handle against the registry
    ///
    /// Consults the rate limiter first: an exhausted window refuses
    /// immediately without a network call or quota consumption; a
    /// too-frequent call waits out the spacing and then proceeds.
    pub async fn check(&self, handle: &str) -> CheckResult {
        let start = Instant::now();

        if let AcquireDecision::WindowExhausted { retry_after } = self.limiter.acquire().await {
            tracing::debug!(
                handle = %handle,
                retry_after_ms = %retry_after.as_millis(),
                "Lookup refused, window exhausted"
            );
            return CheckResult {
                handle: handle.to_string(),
                status: AvailabilityStatus::RateLimited,
                checked_at: Utc::now(),
                check_duration: Some(start.elapsed()),
                error_message: None,
            };
        }

        self.stats.record_check();

        let (status, error_message) = match self.registry.lookup(handle).await {
            Ok(RegistryAnswer::NotFound) => {
                self.stats.record_available();
                (AvailabilityStatus::Available, None)
            }
            Ok(RegistryAnswer::Found) => (AvailabilityStatus::Taken, None),
            Ok(RegistryAnswer::Throttled) => {
                self.stats.record_rate_limit_hit();
                (AvailabilityStatus::RateLimited, None)
            }
            Ok(RegistryAnswer::Unexpected(code)) => {
                tracing::warn!(handle = %handle, status_code = %code, "Unexpected registry response");
                (
                    AvailabilityStatus::Error,
                    Some(format!("unexpected registry status {}", code)),
                )
            }
            Err(e) => {
                tracing::debug!(handle = %handle, error = %e, "Lookup failed");
                (AvailabilityStatus::Error, Some(e.to_string()))
            }
        };

        let duration = start.elapsed();
        tracing::debug!(
            handle = %handle,
            status = %status,
            duration_ms = %duration.as_millis(),
            "Handle check completed"
        );

        CheckResult {
            handle: handle.to_string(),
            status,
            checked_at: Utc::now(),
            check_duration: Some(duration),
            error_message,
        }
    }

    /// Lookups still permitted within the current window
    pub fn remaining_quota(&self) -> u32 {
        self.limiter.remaining()
    }
}
