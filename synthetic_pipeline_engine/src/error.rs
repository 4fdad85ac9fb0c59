//! Errors for malformed generator parameters.
//!
//! An out-of-range factor or a zero count is a caller bug, not a runtime
//! condition the generator recovers from — but this is library code that
//! may be driven by untrusted parameters (a fuzz harness, a config file),
//! so it returns `Result` rather than panicking.

use thiserror::Error;

/// Failure to generate a synthetic observation sequence.
#[derive(Debug, Error, PartialEq)]
pub enum GenerationError {
    /// `B` (the budget) must be strictly positive.
    #[error("invalid budget: B={0}")]
    InvalidBudget(u64),

    /// A window/cycle/oscillation count must be strictly positive.
    #[error("{name} must be > 0, got {value}")]
    InvalidCount {
        /// Name of the offending parameter.
        name: &'static str,
        /// The value that was rejected.
        value: u64,
    },

    /// A multiplier factor fell outside its documented range.
    #[error("{name} must be in {range}, got {value}")]
    InvalidFactor {
        /// Name of the offending parameter.
        name: &'static str,
        /// The value that was rejected.
        value: f64,
        /// Human-readable description of the valid range, e.g. `"(1.0, inf)"`.
        range: &'static str,
    },
}

/// Result type used throughout the generators module.
pub type Result<T> = std::result::Result<T, GenerationError>;
