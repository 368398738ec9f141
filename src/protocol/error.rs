//! Error types for A2A protocol operations

use thiserror::Error;

/// Main error type for A2A protocol operations
#[derive(Debug, Error)]
pub enum A2AError {
    /// Transport-level error (network, connection, etc.)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Protocol-level error (invalid body, undecodable response, etc.)
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Validation error (invalid request or result)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Non-success HTTP status returned by a remote agent
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: url::Url },

    /// Agent card does not advertise a skill the caller requires
    #[error("Agent '{agent}' does not offer skill '{skill}'")]
    MissingSkill { agent: String, skill: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Request timeout error
    #[error("Request timeout")]
    Timeout,
}

/// Result type alias for A2A operations
pub type A2AResult<T> = Result<T, A2AError>;

impl From<reqwest::Error> for A2AError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            A2AError::Timeout
        } else if err.is_connect() {
            A2AError::Transport(format!("Connection error: {}", err))
        } else if err.is_decode() {
            A2AError::Protocol(err.to_string())
        } else {
            A2AError::Transport(err.to_string())
        }
    }
}
