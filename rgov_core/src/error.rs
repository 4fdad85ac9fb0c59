//! Error taxonomy for the governor core.
//!
//! Only the kinds spec'd as *surfaced* failures live here (see the
//! component design notes on `CounterRegression` and `Drift`, which are
//! recovered locally and never reach this type).

use thiserror::Error;

/// Errors surfaced by the governor core to its caller.
#[derive(Debug, Error)]
pub enum GovernorError {
    /// A precondition was violated: negative usage, non-positive budget,
    /// empty workload id, negative quota, over-capacity registration, or a
    /// duplicate workload id.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An observer was measured before `init()` was called.
    #[error("observer used before init()")]
    NotInitialized,

    /// The referenced cgroup control file does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The process lacks permission to read/write a cgroup control file.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// An I/O failure not covered by the more specific kinds above.
    #[error("I/O error: {0}")]
    Io(String),

    /// `cpu.stat` content did not contain a parseable `usage_usec` field.
    #[error("failed to parse {file}: {reason}")]
    Parse {
        /// Path of the file that failed to parse.
        file: String,
        /// Why parsing failed.
        reason: String,
    },

    /// Attempted to register a workload id that is already registered.
    #[error("duplicate workload id: {0}")]
    Duplicate(String),
}

/// Result type used throughout the governor core.
pub type Result<T> = std::result::Result<T, GovernorError>;

impl From<std::io::Error> for GovernorError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(err.to_string()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(err.to_string()),
            _ => Self::Io(err.to_string()),
        }
    }
}

impl From<GovernorError> for shared_core::SystemError {
    fn from(err: GovernorError) -> Self {
        shared_core::SystemError::SystemSpecific {
            system: "rgov_core".to_string(),
            message: err.to_string(),
            context: None,
        }
    }
}
