//! Workload identity.
//!
//! A [`WorkloadId`] is an opaque, non-empty, totally-ordered identifier used
//! only as a key into the policy store and the multi-workload registry. It
//! is deliberately not a generic string newtype shared with the rest of the
//! workspace (`shared_core::Id`) — that type is randomly generated; workload
//! ids are caller-supplied names that must round-trip exactly.

use std::fmt;

use crate::error::{GovernorError, Result};

/// Unique, non-empty, totally-ordered identifier for a registered workload.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct WorkloadId(String);

impl WorkloadId {
    /// Construct a `WorkloadId`, rejecting empty or all-whitespace names.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(GovernorError::InvalidInput(
                "workload id must not be empty".to_string(),
            ));
        }
        Ok(Self(name))
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkloadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for WorkloadId {
    type Error = GovernorError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<String> for WorkloadId {
    type Error = GovernorError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_name() {
        assert!(WorkloadId::new("").is_err());
        assert!(WorkloadId::new("   ").is_err());
    }

    #[test]
    fn accepts_non_empty_name() {
        let id = WorkloadId::new("web-api").unwrap();
        assert_eq!(id.as_str(), "web-api");
        assert_eq!(id.to_string(), "web-api");
    }

    #[test]
    fn orders_by_string_comparison() {
        let a = WorkloadId::new("a").unwrap();
        let b = WorkloadId::new("b").unwrap();
        assert!(a < b);
    }
}
