//! Error types for the evently data layer.

use thiserror::Error;

/// Errors that can occur while talking to the event API.
///
/// `Clone` so the store can record an error in its state and hand the
/// same value back to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    /// The server answered with an envelope whose status is not a success.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Network unreachable, timeout, or a response that could not be read.
    #[error("Network error: {0}")]
    Transport(String),

    /// A success envelope without the payload the operation needs.
    #[error("Server returned no data for {0}")]
    MissingData(String),

    #[error("Invalid event: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl EventError {
    pub fn is_transport(&self) -> bool {
        matches!(self, EventError::Transport(_))
    }

    /// HTTP-like status carried by a server-signaled failure.
    pub fn server_status(&self) -> Option<u16> {
        match self {
            EventError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for evently operations.
pub type EventResult<T> = Result<T, EventError>;
