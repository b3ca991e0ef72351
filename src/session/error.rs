use thiserror::Error;

/// Client-side failures, surfaced to the UI as the error message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Failed to fetch access token: {0}")]
    TokenFetch(String),

    #[error("{0}")]
    SessionStart(String),

    #[error("Failed to end session: {0}")]
    SessionStop(String),

    /// Upstream ended the session; not a fault of this client
    #[error("Connection lost. Please start a new session.")]
    Disconnected,
}
