//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
///
/// Only [`SdkError::Transport`] is eligible for silencing by a client
/// configured with `silence_exc`; every other variant always reaches the
/// caller.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl SdkError {
    /// Whether this error came from the transport layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, SdkError::Transport(_))
    }
}

/// Transport-layer errors: anything that went wrong moving bytes to or from
/// the status page.
#[derive(Error, Debug)]
pub enum TransportError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Session is closed")]
    SessionClosed,

    #[error("Connection failed: {0}")]
    Connection(String),
}

/// Result alias used throughout the crate.
pub type SdkResult<T> = Result<T, SdkError>;
