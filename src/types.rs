//! Core types and structures for handle-forge

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Handle availability status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    Available,
    Taken,
    RateLimited,
    Error,
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AvailabilityStatus::Available => write!(f, "available"),
            AvailabilityStatus::Taken => write!(f, "taken"),
            AvailabilityStatus::RateLimited => write!(f, "rate_limited"),
            AvailabilityStatus::Error => write!(f, "error"),
        }
    }
}

/// Handle availability check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub handle: String,
    pub status: AvailabilityStatus,
    pub checked_at: DateTime<Utc>,
    pub check_duration: Option<Duration>,
    pub error_message: Option<String>,
}

/// Configuration for availability checking
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Registry user-lookup base URL (no trailing slash)
    pub api_base: String,
    /// Per-lookup timeout
    pub timeout: Duration,
    /// Handles checked concurrently per batch
    pub batch_size: usize,
    /// Pause between batches, smooths outbound call rate
    pub batch_delay: Duration,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            api_base: crate::registry::DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(10),
            batch_size: 2,
            batch_delay: Duration::from_millis(3000),
        }
    }
}

/// Configuration for candidate generation
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Maximum candidates returned per seed
    pub max_candidates: usize,
    /// Probability that a given affix contributes a candidate
    pub affix_probability: f64,
    /// Probability that a pool entry gains a numeric variant
    pub number_probability: f64,
    /// Inclusive bounds for numeric suffixes
    pub number_range: (u32, u32),
    /// Chunk length used when splitting long seeds
    pub chunk_len: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_candidates: 12,
            affix_probability: 0.5,
            number_probability: 0.4,
            number_range: (10, 99),
            chunk_len: 3,
        }
    }
}

/// Configuration for the sliding-window rate limiter
#[derive(Debug, Clone)]
pub struct LimiterConfig {
    /// Sliding window length
    pub window: Duration,
    /// Hard cap on lookups per window
    pub max_calls: u32,
    /// Minimum spacing between consecutive lookups
    pub min_spacing: Duration,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(3600),
            max_calls: 55,
            min_spacing: Duration::from_millis(1000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(AvailabilityStatus::Available.to_string(), "available");
        assert_eq!(AvailabilityStatus::Taken.to_string(), "taken");
        assert_eq!(AvailabilityStatus::RateLimited.to_string(), "rate_limited");
        assert_eq!(AvailabilityStatus::Error.to_string(), "error");
    }

    #[test]
    fn test_status_serde_roundtrip() {
        let json = serde_json::to_string(&AvailabilityStatus::RateLimited).unwrap();
        assert_eq!(json, "\"rate_limited\"");
        let back: AvailabilityStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AvailabilityStatus::RateLimited);
    }

    #[test]
    fn test_default_configs() {
        let check = CheckConfig::default();
        assert_eq!(check.batch_size, 2);
        assert_eq!(check.timeout, Duration::from_secs(10));

        let limiter = LimiterConfig::default();
        assert_eq!(limiter.max_calls, 55);
        assert_eq!(limiter.window, Duration::from_secs(3600));

        let generation = GenerationConfig::default();
        assert!(generation.max_candidates >= 8 && generation.max_candidates <= 15);
    }
}
