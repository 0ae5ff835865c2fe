//! Lookup error types.

use std::time::Duration;

/// Errors an async lookup can resolve with.
///
/// Lookup errors never leave the dropdown: they become an empty result set and
/// a warning in the log.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// The lookup function reported a failure.
    #[error("Lookup failed: {0}")]
    Failed(String),

    /// The lookup did not complete within the configured timeout.
    #[error("Lookup timed out after {0:?}")]
    Timeout(Duration),
}

impl LookupError {
    /// Create a failure with a message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

impl From<std::io::Error> for LookupError {
    fn from(err: std::io::Error) -> Self {
        Self::Failed(err.to_string())
    }
}

impl From<String> for LookupError {
    fn from(message: String) -> Self {
        Self::Failed(message)
    }
}

impl From<&str> for LookupError {
    fn from(message: &str) -> Self {
        Self::failed(message)
    }
}
