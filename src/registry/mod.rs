//! Registry lookup: the single "does this user exist" query

pub mod batch;
pub mod checker;
pub mod github;
pub mod testing;

// Re-export main functionality
pub use batch::{BatchEvents, BatchReport, BatchRunner};
pub use checker::HandleChecker;
pub use github::GithubRegistry;

use async_trait::async_trait;

use crate::error::Result;

/// Default user-lookup endpoint
pub const DEFAULT_API_BASE: &str = "https://api.github.com/users";

/// Versioned JSON representation we ask the registry for
pub const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

/// Descriptive client identifier sent with every lookup
pub const USER_AGENT: &str = concat!("handle-forge/", env!("CARGO_PKG_VERSION"));

/// Raw registry answer, before outcome classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryAnswer {
    /// No such user: the handle is unclaimed
    NotFound,
    /// The user exists
    Found,
    /// The registry is refusing us (forbidden / too many requests)
    Throttled,
    /// Any status outside the known set
    Unexpected(u16),
}

/// Trait for registry lookup backends
#[async_trait]
pub trait RegistryLookup: Send + Sync {
    /// Perform one lookup for the given handle
    async fn lookup(&self, handle: &str) -> Result<RegistryAnswer>;
}
