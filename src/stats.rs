//! Session statistics accumulation and persistence

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::store::StateStore;

/// Interval between periodic stats flushes
const FLUSH_INTERVAL: Duration = Duration::from_secs(30);

/// Persisted session counters
///
/// Counters accumulate across sessions and are never reset except by
/// clearing the state directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionStats {
    #[serde(default)]
    pub total_checks: u64,
    #[serde(default)]
    pub total_generated: u64,
    #[serde(default)]
    pub total_available: u64,
    #[serde(default)]
    pub rate_limit_hits: u64,
    #[serde(default)]
    pub sessions_count: u64,
}

/// Thread-safe stats accumulator with best-effort persistence
pub struct StatsRecorder {
    inner: Mutex<SessionStats>,
    store: StateStore,
}

impl StatsRecorder {
    /// Load persisted stats, falling back to defaults on any failure
    pub fn load(store: StateStore) -> Self {
        let stats = store.load_stats().unwrap_or_else(|e| {
            tracing::debug!(error = %e, "No usable session stats, starting fresh");
            SessionStats::default()
        });

        Self {
            inner: Mutex::new(stats),
            store,
        }
    }

    /// Mark a new session: bump the session counter and flush
    pub fn session_started(&self) {
        self.inner.lock().sessions_count += 1;
        self.flush();
    }

    pub fn record_check(&self) {
        self.inner.lock().total_checks += 1;
    }

    pub fn record_generated(&self, count: u64) {
        self.inner.lock().total_generated += count;
    }

    pub fn record_available(&self) {
        self.inner.lock().total_available += 1;
    }

    pub fn record_rate_limit_hit(&self) {
        self.inner.lock().rate_limit_hits += 1;
    }

    /// Current counter values
    pub fn snapshot(&self) -> SessionStats {
        self.inner.lock().clone()
    }

    /// Persist current counters. Failures are logged, never propagated.
    pub fn flush(&self) {
        let snapshot = self.inner.lock().clone();
        if let Err(e) = self.store.save_stats(&snapshot) {
            tracing::warn!(error = %e, "Failed to persist session stats");
        }
    }

    /// Spawn a background task that flushes on a fixed timer
    pub fn spawn_flush_task(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        let recorder = self;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(FLUSH_INTERVAL);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                recorder.flush();
            }
        })
    }
}
