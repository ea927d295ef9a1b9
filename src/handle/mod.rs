//! Handle validation and candidate generation

pub mod generator;
pub mod validator;

// Re-export main functionality
pub use generator::HandleGenerator;
pub use validator::{HandleValidator, ValidatedHandle, ValidationError, MAX_HANDLE_LEN};

/// Default affix corpus for candidate generation
///
/// Presentation-tuning values, not a contract; callers may swap in any
/// corpus as long as the validity and cap invariants hold.
pub const DEFAULT_AFFIXES: &[&str] = &[
    "dev", "codes", "tech", "engineer", "labs", "hq", "system",
    "cloud", "data", "works", "studio", "official", "solutions",
    "builds", "opensource", "digital", "stack", "core",
];
