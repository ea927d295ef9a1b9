//! Durable key-value state storage
//!
//! Call history and session statistics survive process restarts as JSON
//! files under a single state directory. Both keys are best-effort at the
//! call sites: load failures fall back to defaults, save failures are
//! logged and never interrupt the operation in progress.

use std::path::{Path, PathBuf};

use crate::error::{HandleForgeError, Result};
use crate::stats::SessionStats;

/// File name for the rate limiter's call history
pub const CALL_HISTORY_KEY: &str = "call_history.json";

/// File name for persisted session statistics
pub const STATS_KEY: &str = "session_stats.json";

/// JSON file store rooted at a state directory
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    /// Create a store rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default state directory (`~/.handle-forge`, falling back to CWD)
    pub fn default_dir() -> PathBuf {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".handle-forge")
    }

    /// Directory this store writes into
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load the recorded call history (millisecond epoch timestamps)
    pub fn load_history(&self) -> Result<Vec<i64>> {
        self.load_json(CALL_HISTORY_KEY)
    }

    /// Persist the call history
    pub fn save_history(&self, history: &[i64]) -> Result<()> {
        self.save_json(CALL_HISTORY_KEY, &history)
    }

    /// Load persisted session statistics
    pub fn load_stats(&self) -> Result<SessionStats> {
        self.load_json(STATS_KEY)
    }

    /// Persist session statistics
    pub fn save_stats(&self, stats: &SessionStats) -> Result<()> {
        self.save_json(STATS_KEY, stats)
    }

    fn load_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<T> {
        let path = self.dir.join(key);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            HandleForgeError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
        })?;

        serde_json::from_str(&content)
            .map_err(|e| HandleForgeError::parse(e.to_string(), Some(content)))
    }

    fn save_json<T: serde::Serialize>(&self, key: &str, value: &T) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            HandleForgeError::io(e.to_string(), Some(self.dir.to_string_lossy().to_string()))
        })?;

        let content = serde_json::to_string_pretty(value)
            .map_err(|e| HandleForgeError::internal(format!("Failed to serialize state: {}", e)))?;

        let path = self.dir.join(key);
        std::fs::write(&path, content).map_err(|e| {
            HandleForgeError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path());

        let history = vec![1_700_000_000_000_i64, 1_700_000_001_000, 1_700_000_002_500];
        store.save_history(&history).unwrap();
        assert_eq!(store.load_history().unwrap(), history);
    }

    #[test]
    fn test_stats_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path());

        let mut stats = SessionStats::default();
        stats.total_checks = 42;
        stats.rate_limit_hits = 3;
        store.save_stats(&stats).unwrap();

        let loaded = store.load_stats().unwrap();
        assert_eq!(loaded.total_checks, 42);
        assert_eq!(loaded.rate_limit_hits, 3);
    }

    #[test]
    fn test_missing_files_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("nested"));

        assert!(store.load_history().is_err());
        assert!(store.load_stats().is_err());
    }

    #[test]
    fn test_save_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("a").join("b"));

        store.save_history(&[1]).unwrap();
        assert_eq!(store.load_history().unwrap(), vec![1]);
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path());

        std::fs::write(dir.path().join(CALL_HISTORY_KEY), "not json").unwrap();
        assert!(matches!(
            store.load_history(),
            Err(HandleForgeError::Parse { .. })
        ));
    }
}
