//! Common types and traits
//!
//! This module defines common types and traits used across all systems.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Id(String);

impl Id {
    /// Create a new ID from a string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random ID
    pub fn generate() -> Self {
        use rand::Rng;
        let random: u128 = rand::thread_rng().gen();
        Self(format!("{:032x}", random))
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Timestamp in milliseconds since Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a timestamp from milliseconds
    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Get the current timestamp
    /// If system time goes backwards (e.g., clock adjustment), returns 0
    pub fn now() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_else(|_| {
                // Handle time going backwards gracefully
                // This can happen with NTP adjustments or manual clock changes
                std::time::Duration::from_secs(0)
            });
        Self(duration.as_millis() as u64)
    }

    /// Get the timestamp as milliseconds
    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Get the timestamp as seconds
    pub fn as_secs(&self) -> u64 {
        self.0 / 1000
    }

    /// Get the timestamp as fractional seconds, for call sites that want a
    /// non-semantic wall-clock value without milliseconds-integer rounding
    /// (e.g. a trace emitter stamping a decision record).
    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1000.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
