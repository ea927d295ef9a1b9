//! Client-side rate-limit governance for registry lookups

mod clock;
mod window;

pub use clock::{Clock, ManualClock, SystemClock};
pub use window::{AcquireDecision, LimitDecision, RateLimiter};
