//! Transport layer: the collaborator a client issues its requests through.
//!
//! A [`Transport`] opens [`Session`]s; a session is a connection-pooling handle
//! that issues GET requests until it is closed. The default implementation is
//! [`HttpTransport`], backed by `reqwest`. Tests and embedders can supply their
//! own through [`StatusClientBuilder::transport`](crate::client::StatusClientBuilder::transport).

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::{HttpSession, HttpTransport};

use crate::error::SdkResult;
use crate::network;

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

// ─── Options ─────────────────────────────────────────────────────────────────

/// Options forwarded verbatim to [`Transport::open`].
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Per-request timeout. `None` disables it.
    pub timeout: Option<Duration>,
    pub pool_max_idle_per_host: usize,
    pub user_agent: String,
    /// Extra headers sent with every request.
    pub headers: Vec<(String, String)>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            timeout: Some(network::DEFAULT_TIMEOUT),
            pool_max_idle_per_host: network::DEFAULT_POOL_MAX_IDLE_PER_HOST,
            user_agent: network::DEFAULT_USER_AGENT.to_string(),
            headers: Vec::new(),
        }
    }
}

// ─── Response ────────────────────────────────────────────────────────────────

/// A fully read reply. Any HTTP status is a reply, not a transport error;
/// the body is decoded whatever the status.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Decode the body as JSON. A malformed body is an
    /// [`SdkError::Decode`](crate::error::SdkError::Decode).
    pub fn json(&self) -> SdkResult<Value> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

// ─── Traits ──────────────────────────────────────────────────────────────────

/// An open, connection-pooling session.
#[async_trait]
pub trait Session: Send + Sync + fmt::Debug {
    /// Issue a single GET request and read the whole body.
    ///
    /// Replies with any HTTP status are `Ok`. Failures moving the request or
    /// response (connect, timeout, body read) must be reported as
    /// [`SdkError::Transport`](crate::error::SdkError::Transport); only those
    /// are eligible for silencing.
    async fn get(&self, url: &str) -> SdkResult<Response>;

    /// Release the session. Closing an already closed session is a no-op.
    async fn close(&self) -> SdkResult<()>;

    fn is_closed(&self) -> bool;
}

/// Opens sessions.
pub trait Transport: Send + Sync + fmt::Debug {
    fn open(&self, options: &SessionOptions) -> SdkResult<Arc<dyn Session>>;
}
