//! Sliding-window rate limiter for outbound registry lookups
//!
//! Tracks the timestamps of past lookups in a window that slides relative
//! to "now". The window survives process restarts through the state store,
//! so a user cannot dodge the quota by relaunching.

use std::time::Duration;

use parking_lot::Mutex;

use crate::limiter::clock::{Clock, SystemClock};
use crate::store::StateStore;
use crate::types::LimiterConfig;

/// Decision from consulting the limiter before a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitDecision {
    /// Lookup may proceed now
    Allowed,
    /// Window quota is spent; refuse until the oldest record expires
    WindowExhausted { retry_after: Duration },
    /// Last call was too recent; wait out the residual spacing
    TooFrequent { retry_after: Duration },
}

impl LimitDecision {
    /// Whether the lookup is blocked in any form
    pub fn is_limited(&self) -> bool {
        !matches!(self, LimitDecision::Allowed)
    }

    /// Suggested wait before the next attempt, if blocked
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            LimitDecision::Allowed => None,
            LimitDecision::WindowExhausted { retry_after }
            | LimitDecision::TooFrequent { retry_after } => Some(*retry_after),
        }
    }
}

/// Outcome of `RateLimiter::acquire`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireDecision {
    /// A slot was taken and recorded; the caller may issue the lookup
    Proceeded,
    /// Window quota is spent; no slot was taken
    WindowExhausted { retry_after: Duration },
}

#[derive(Debug, Default)]
struct WindowState {
    /// Completed-lookup timestamps, insertion order, epoch ms
    records: Vec<i64>,
    last_call: Option<i64>,
}

/// Sliding-window limiter with persisted call history
pub struct RateLimiter {
    config: LimiterConfig,
    clock: Box<dyn Clock>,
    store: StateStore,
    state: Mutex<WindowState>,
}

impl RateLimiter {
    /// Create a limiter on the wall clock, loading persisted history
    pub fn new(config: LimiterConfig, store: StateStore) -> Self {
        Self::with_clock(config, store, SystemClock)
    }

    /// Create a limiter on a custom clock (tests drive a manual one)
    pub fn with_clock(
        config: LimiterConfig,
        store: StateStore,
        clock: impl Clock + 'static,
    ) -> Self {
        let records = store.load_history().unwrap_or_else(|e| {
            tracing::debug!(error = %e, "No usable call history, starting fresh");
            Vec::new()
        });

        let limiter = Self {
            config,
            clock: Box::new(clock),
            store,
            state: Mutex::new(WindowState {
                last_call: records.last().copied(),
                records,
            }),
        };

        // Drop anything outside the window right away
        {
            let mut state = limiter.state.lock();
            limiter.prune(&mut state);
        }

        limiter
    }

    /// Decide whether a lookup may proceed right now
    pub fn check(&self) -> LimitDecision {
        let mut state = self.state.lock();
        self.decide(&mut state)
    }

    /// Record one completed outbound lookup and persist the history
    pub fn record_call(&self) {
        let snapshot = {
            let mut state = self.state.lock();
            self.push_record(&mut state)
        };
        self.persist(&snapshot);
    }

    /// Lookups still permitted within the current window
    pub fn remaining(&self) -> u32 {
        let mut state = self.state.lock();
        self.prune(&mut state);
        self.config
            .max_calls
            .saturating_sub(state.records.len() as u32)
    }

    /// Take a lookup slot, honoring the limiter's pacing protocol.
    ///
    /// `WindowExhausted` is returned immediately and consumes no quota.
    /// `TooFrequent` waits out the residual spacing and then records the
    /// call without rechecking the window (a wait, not a retry).
    pub async fn acquire(&self) -> AcquireDecision {
        let wait = {
            let mut state = self.state.lock();
            match self.decide(&mut state) {
                LimitDecision::Allowed => {
                    let snapshot = self.push_record(&mut state);
                    drop(state);
                    self.persist(&snapshot);
                    return AcquireDecision::Proceeded;
                }
                LimitDecision::WindowExhausted { retry_after } => {
                    return AcquireDecision::WindowExhausted { retry_after };
                }
                LimitDecision::TooFrequent { retry_after } => retry_after,
            }
        };

        tokio::time::sleep(wait).await;

        let snapshot = {
            let mut state = self.state.lock();
            self.push_record(&mut state)
        };
        self.persist(&snapshot);
        AcquireDecision::Proceeded
    }

    /// Limiter configuration
    pub fn config(&self) -> &LimiterConfig {
        &self.config
    }

    fn window_ms(&self) -> i64 {
        self.config.window.as_millis() as i64
    }

    fn prune(&self, state: &mut WindowState) {
        let now = self.clock.now_ms();
        let window = self.window_ms();
        state.records.retain(|&t| now - t < window);
    }

    fn decide(&self, state: &mut WindowState) -> LimitDecision {
        let now = self.clock.now_ms();
        self.prune(state);

        if state.records.len() as u32 >= self.config.max_calls {
            let retry = state
                .records
                .first()
                .map(|&oldest| self.window_ms() - (now - oldest))
                .unwrap_or_else(|| self.window_ms());
            return LimitDecision::WindowExhausted {
                retry_after: Duration::from_millis(retry.max(0) as u64),
            };
        }

        if let Some(last) = state.last_call {
            let spacing = self.config.min_spacing.as_millis() as i64;
            let since = now - last;
            if since < spacing {
                return LimitDecision::TooFrequent {
                    retry_after: Duration::from_millis((spacing - since) as u64),
                };
            }
        }

        LimitDecision::Allowed
    }

    fn push_record(&self, state: &mut WindowState) -> Vec<i64> {
        let now = self.clock.now_ms();
        state.records.push(now);
        state.last_call = Some(now);
        state.records.clone()
    }

    fn persist(&self, records: &[i64]) {
        if let Err(e) = self.store.save_history(records) {
            tracing::warn!(error = %e, "Failed to persist call history");
        }
    }
}
