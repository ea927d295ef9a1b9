//! Handle validation against the registry's naming grammar

use regex::Regex;
use thiserror::Error;

/// Maximum handle length accepted by the registry
pub const MAX_HANDLE_LEN: usize = 39;

/// Why a candidate handle was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("handle cannot be empty")]
    Empty,

    #[error("handle too long ({length} characters, max {MAX_HANDLE_LEN})")]
    TooLong { length: usize },

    #[error("handle cannot start or end with hyphen")]
    HyphenEdge,

    #[error("handle cannot contain consecutive hyphens")]
    ConsecutiveHyphens,

    #[error("handle contains invalid characters")]
    InvalidCharacter,
}

/// A handle that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedHandle {
    handle: String,
}

impl ValidatedHandle {
    pub fn as_str(&self) -> &str {
        &self.handle
    }

    pub fn into_string(self) -> String {
        self.handle
    }
}

impl std::fmt::Display for ValidatedHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.handle)
    }
}

/// Handle validator enforcing the registry grammar
///
/// Handles are 1-39 characters of ASCII alphanumerics and hyphens, may not
/// begin or end with a hyphen, and may not contain consecutive hyphens.
pub struct HandleValidator {
    charset: Regex,
}

impl HandleValidator {
    pub fn new() -> Self {
        Self {
            charset: Regex::new(r"^[A-Za-z0-9-]+$").expect("static charset pattern"),
        }
    }

    /// Validate a candidate handle
    ///
    /// Total function: every input maps to `Ok` or a specific rejection
    /// reason, in rule order. No side effects.
    pub fn validate(&self, candidate: &str) -> Result<ValidatedHandle, ValidationError> {
        if candidate.is_empty() {
            return Err(ValidationError::Empty);
        }

        let length = candidate.chars().count();
        if length > MAX_HANDLE_LEN {
            return Err(ValidationError::TooLong { length });
        }

        // Single characters bypass the hyphen rules entirely
        if length == 1 {
            return if candidate.chars().all(|c| c.is_ascii_alphanumeric()) {
                Ok(ValidatedHandle {
                    handle: candidate.to_string(),
                })
            } else {
                Err(ValidationError::InvalidCharacter)
            };
        }

        if candidate.starts_with('-') || candidate.ends_with('-') {
            return Err(ValidationError::HyphenEdge);
        }

        if candidate.contains("--") {
            return Err(ValidationError::ConsecutiveHyphens);
        }

        if !self.charset.is_match(candidate) {
            return Err(ValidationError::InvalidCharacter);
        }

        Ok(ValidatedHandle {
            handle: candidate.to_string(),
        })
    }

    /// Check validity without caring about the reason
    pub fn is_valid(&self, candidate: &str) -> bool {
        self.validate(candidate).is_ok()
    }

    /// Normalize a seed string for generation: lowercase, alphanumerics only
    pub fn normalize_seed(&self, seed: &str) -> String {
        seed.trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect()
    }
}

impl Default for HandleValidator {
    fn default() -> Self {
        Self::new()
    }
}
