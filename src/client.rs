//! High-level client: `StatusClient` and its builder.
//!
//! A client owns exactly one transport session from construction until it is
//! closed, and registers that session in a [`SessionRegistry`] so leftovers
//! can be swept in bulk.

use crate::endpoint::Endpoint;
use crate::error::{SdkError, SdkResult};
use crate::registry::{CleanupReport, ClientId, SessionRegistry};
use crate::transport::{Session, SessionOptions, Transport};

use futures::future::BoxFuture;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Decoded endpoint body, or `None` when a transport error was silenced.
pub type JsonResponse = Option<Value>;

/// A connection to the status page API.
///
/// ```rust,ignore
/// use discord_status::StatusClient;
///
/// let client = StatusClient::new()?;
/// let status = client.get_status().await?;
/// client.close().await?;
/// ```
#[derive(Debug)]
pub struct StatusClient {
    id: ClientId,
    base_url: String,
    session: Arc<dyn Session>,
    registry: SessionRegistry,
    silence_exc: AtomicBool,
}

impl StatusClient {
    pub fn builder() -> StatusClientBuilder {
        StatusClientBuilder::default()
    }

    /// Default client against the global registry. Errors are not silenced.
    pub fn new() -> SdkResult<Self> {
        Self::builder().build()
    }

    pub fn with_silence_exc(silence_exc: bool) -> SdkResult<Self> {
        Self::builder().silence_exc(silence_exc).build()
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Whether transport errors are currently swallowed.
    pub fn silence_exc(&self) -> bool {
        self.silence_exc.load(Ordering::SeqCst)
    }

    /// Change the error policy. Applies to calls started after this returns.
    pub fn set_silence_exc(&self, silence_exc: bool) {
        self.silence_exc.store(silence_exc, Ordering::SeqCst);
    }

    /// Whether the owned session has been closed, either by
    /// [`close`](Self::close) or by a registry sweep.
    pub fn closed(&self) -> bool {
        self.session.is_closed()
    }

    // ── Endpoints ────────────────────────────────────────────────────────

    /// Fetch any endpoint from the table.
    pub async fn get(&self, endpoint: Endpoint) -> SdkResult<JsonResponse> {
        self.fetch_json(&endpoint.url(&self.base_url)).await
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Close the session and deregister it. Safe to call more than once, and
    /// after a registry sweep already closed it.
    pub async fn close(&self) -> SdkResult<()> {
        self.session.close().await?;
        self.registry.remove(self.id);
        Ok(())
    }

    /// Run `body` against this client, then close it however `body` ended.
    ///
    /// The body's result is returned unchanged. A close failure is only
    /// surfaced when the body itself succeeded.
    ///
    /// ```rust,ignore
    /// let client = StatusClient::new()?;
    /// let summary = client
    ///     .scoped(|c| Box::pin(async move { c.get_summary().await }))
    ///     .await?;
    /// assert!(client.closed());
    /// ```
    pub async fn scoped<T, F>(&self, body: F) -> SdkResult<T>
    where
        F: for<'c> FnOnce(&'c StatusClient) -> BoxFuture<'c, SdkResult<T>>,
    {
        let result = body(self).await;
        let closed = self.close().await;
        match (result, closed) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), _) => Err(e),
        }
    }

    /// Build a default client and run `body` through [`scoped`](Self::scoped).
    pub async fn open_scoped<T, F>(body: F) -> SdkResult<T>
    where
        F: for<'c> FnOnce(&'c StatusClient) -> BoxFuture<'c, SdkResult<T>>,
    {
        Self::new()?.scoped(body).await
    }

    /// Close every session left in the global registry, including clients
    /// the caller never closed. Blocks until done; needs no runtime.
    pub fn close_all_sessions() -> CleanupReport {
        SessionRegistry::global().close_all_blocking()
    }

    // ── Internal ─────────────────────────────────────────────────────────

    async fn fetch_json(&self, url: &str) -> SdkResult<JsonResponse> {
        tracing::debug!(client = %self.id, url, "GET");

        let fetched = match self.session.get(url).await {
            Ok(resp) => resp.json().map(Some),
            Err(e) => Err(e),
        };

        match fetched {
            Err(SdkError::Transport(_)) if self.silence_exc() => Ok(None),
            other => other,
        }
    }
}

macro_rules! client_methods {
    ($($(#[$doc:meta])* $name:ident => $variant:ident($path:literal),)*) => {
        impl StatusClient {
            $(
                $(#[$doc])*
                pub async fn $name(&self) -> SdkResult<JsonResponse> {
                    self.get(Endpoint::$variant).await
                }
            )*
        }
    };
}

with_endpoints!(client_methods);

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct StatusClientBuilder {
    silence_exc: bool,
    base_url: String,
    options: SessionOptions,
    transport: Option<Arc<dyn Transport>>,
    registry: Option<SessionRegistry>,
}

impl Default for StatusClientBuilder {
    fn default() -> Self {
        Self {
            silence_exc: false,
            base_url: crate::network::DEFAULT_BASE_URL.to_string(),
            options: SessionOptions::default(),
            transport: None,
            registry: None,
        }
    }
}

impl StatusClientBuilder {
    /// Swallow transport errors and return `None` instead.
    pub fn silence_exc(mut self, silence_exc: bool) -> Self {
        self.silence_exc = silence_exc;
        self
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    pub fn no_timeout(mut self) -> Self {
        self.options.timeout = None;
        self
    }

    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.options.pool_max_idle_per_host = max;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.options.user_agent = user_agent.into();
        self
    }

    /// Add a header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.headers.push((name.into(), value.into()));
        self
    }

    /// Replace all transport options at once.
    pub fn options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    /// Open sessions through `transport` instead of the default HTTP one.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Register with `registry` instead of the global one.
    pub fn registry(mut self, registry: SessionRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Open the session and register it. Nothing is registered on error.
    pub fn build(self) -> SdkResult<StatusClient> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(SdkError::Config(format!(
                "Base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => default_transport()?,
        };
        let session = transport.open(&self.options)?;

        let id = ClientId::next();
        let registry = self
            .registry
            .unwrap_or_else(|| SessionRegistry::global().clone());
        registry.insert(id, session.clone());

        Ok(StatusClient {
            id,
            base_url: self.base_url,
            session,
            registry,
            silence_exc: AtomicBool::new(self.silence_exc),
        })
    }
}

#[cfg(feature = "http")]
fn default_transport() -> SdkResult<Arc<dyn Transport>> {
    Ok(Arc::new(crate::transport::HttpTransport))
}

#[cfg(not(feature = "http"))]
fn default_transport() -> SdkResult<Arc<dyn Transport>> {
    Err(SdkError::Config(
        "No transport configured and the `http` feature is disabled".to_string(),
    ))
}
