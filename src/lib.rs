//! Handle Forge - username generation and availability checking
//!
//! Generates candidate usernames from a seed and checks them against
//! GitHub's user-lookup API, with client-side sliding-window rate limiting
//! persisted across sessions.

pub mod error;
pub mod handle;
pub mod limiter;
pub mod registry;
pub mod stats;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::{HandleForgeError, Result};
pub use handle::{HandleGenerator, HandleValidator, ValidationError};
pub use limiter::{AcquireDecision, LimitDecision, RateLimiter};
pub use registry::{BatchEvents, BatchReport, BatchRunner, GithubRegistry, HandleChecker};
pub use stats::{SessionStats, StatsRecorder};
pub use store::StateStore;
pub use types::{AvailabilityStatus, CheckConfig, CheckResult, GenerationConfig, LimiterConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
