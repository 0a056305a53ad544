//! `reqwest`-backed transport.

use crate::error::{SdkError, SdkResult, TransportError};
use crate::transport::{Response, Session, SessionOptions, Transport};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::Client;
use std::sync::{Arc, Mutex, PoisonError};

/// Opens [`HttpSession`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpTransport;

impl Transport for HttpTransport {
    fn open(&self, options: &SessionOptions) -> SdkResult<Arc<dyn Session>> {
        Ok(Arc::new(HttpSession::open(options)?))
    }
}

/// A pooled `reqwest::Client`. Closing drops the client and its idle
/// connections; later requests fail with [`TransportError::SessionClosed`].
#[derive(Debug)]
pub struct HttpSession {
    client: Mutex<Option<Client>>,
}

impl HttpSession {
    pub fn open(options: &SessionOptions) -> SdkResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        for (name, value) in &options.headers {
            let header_name = HeaderName::try_from(name.as_str())
                .map_err(|e| SdkError::Config(format!("Invalid header name '{}': {}", name, e)))?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                SdkError::Config(format!("Invalid header value for '{}': {}", name, e))
            })?;
            headers.insert(header_name, header_value);
        }

        let mut builder = Client::builder()
            .default_headers(headers)
            .user_agent(options.user_agent.as_str())
            .pool_max_idle_per_host(options.pool_max_idle_per_host);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(TransportError::from)?;
        tracing::debug!(
            pool_max_idle_per_host = options.pool_max_idle_per_host,
            "Opened HTTP session"
        );

        Ok(Self {
            client: Mutex::new(Some(client)),
        })
    }

    fn current(&self) -> Result<Client, TransportError> {
        self.client
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(TransportError::SessionClosed)
    }
}

#[async_trait]
impl Session for HttpSession {
    async fn get(&self, url: &str) -> SdkResult<Response> {
        let client = self.current()?;

        let resp = client.get(url).send().await.map_err(TransportError::from)?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(TransportError::from)?;

        Ok(Response::new(status, body.to_vec()))
    }

    async fn close(&self) -> SdkResult<()> {
        let dropped = self
            .client
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if dropped.is_some() {
            tracing::debug!("Closed HTTP session");
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.client
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}
