//! Error taxonomy for remote synchronization.
//!
//! Validation failures never reach this layer (see [`crate::validation`]).
//! What remains is split by who failed: the grade API rejecting a request
//! ([`SyncError::Application`]) or the exchange itself breaking down
//! ([`SyncError::Transport`]). The two are surfaced differently to the user.

/// Failure of a single gateway exchange. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    /// The server answered with `success: false`.
    #[error("{}", join_errors(.errors))]
    Application { errors: Vec<String> },
    /// The server could not be reached or did not answer intelligibly.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl SyncError {
    /// Builds an application error from the server's error strings.
    #[must_use]
    pub fn rejected(errors: Vec<String>) -> Self {
        Self::Application { errors }
    }

    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Transport-level failure classes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("no response within {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

/// Fallback shown when a rejection carries no error strings.
pub const UNSPECIFIED_REJECTION: &str = "request rejected by server";

/// Joins server error strings for display in a single banner.
#[must_use]
pub fn join_errors(errors: &[String]) -> String {
    if errors.is_empty() {
        UNSPECIFIED_REJECTION.to_string()
    } else {
        errors.join(", ")
    }
}
