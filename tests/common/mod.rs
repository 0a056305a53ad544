//! Recording in-memory transport shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use discord_status::transport::{Response, Session, SessionOptions, Transport};
use discord_status::{SdkError, SdkResult, SessionRegistry, StatusClient, TransportError};

pub const BASE_URL: &str = "http://status.test";

/// What every GET through a [`MockTransport`] session does.
#[derive(Debug, Clone)]
pub enum Behavior {
    Json(Value),
    InvalidJson,
    TransportFailure,
    OtherFailure,
}

#[derive(Debug)]
struct MockState {
    behavior: Mutex<Behavior>,
    requests: Mutex<Vec<String>>,
    sessions: Mutex<Vec<Arc<MockSession>>>,
    fail_close: bool,
}

#[derive(Debug, Clone)]
pub struct MockTransport {
    state: Arc<MockState>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::with_close_failure(false)
    }

    /// Sessions from this transport fail every close.
    pub fn failing_close() -> Self {
        Self::with_close_failure(true)
    }

    fn with_close_failure(fail_close: bool) -> Self {
        Self {
            state: Arc::new(MockState {
                behavior: Mutex::new(Behavior::Json(sample_page())),
                requests: Mutex::new(Vec::new()),
                sessions: Mutex::new(Vec::new()),
                fail_close,
            }),
        }
    }

    pub fn set_behavior(&self, behavior: Behavior) {
        *self.state.behavior.lock().unwrap() = behavior;
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests().iter().filter(|r| r.as_str() == url).count()
    }

    pub fn sessions_opened(&self) -> usize {
        self.state.sessions.lock().unwrap().len()
    }

    pub fn all_sessions_closed(&self) -> bool {
        self.state
            .sessions
            .lock()
            .unwrap()
            .iter()
            .all(|s| s.is_closed())
    }
}

impl Transport for MockTransport {
    fn open(&self, _options: &SessionOptions) -> SdkResult<Arc<dyn Session>> {
        let session = Arc::new(MockSession {
            state: self.state.clone(),
            closed: AtomicBool::new(false),
        });
        self.state.sessions.lock().unwrap().push(session.clone());
        Ok(session)
    }
}

#[derive(Debug)]
pub struct MockSession {
    state: Arc<MockState>,
    closed: AtomicBool,
}

#[async_trait]
impl Session for MockSession {
    async fn get(&self, url: &str) -> SdkResult<Response> {
        if self.is_closed() {
            return Err(TransportError::SessionClosed.into());
        }
        self.state.requests.lock().unwrap().push(url.to_string());

        let behavior = self.state.behavior.lock().unwrap().clone();
        match behavior {
            Behavior::Json(value) => Ok(Response::new(200, value.to_string())),
            Behavior::InvalidJson => Ok(Response::new(200, "<html>maintenance</html>")),
            Behavior::TransportFailure => {
                Err(TransportError::Connection("connection reset by peer".into()).into())
            }
            Behavior::OtherFailure => Err(SdkError::Other("unexpected failure".into())),
        }
    }

    async fn close(&self) -> SdkResult<()> {
        if self.state.fail_close {
            return Err(TransportError::Connection("close timed out".into()).into());
        }
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// A trimmed-down summary payload.
pub fn sample_page() -> Value {
    json!({
        "page": {
            "id": "srhpyqt94yxb",
            "name": "Discord",
            "url": "https://discordstatus.com"
        },
        "status": {
            "indicator": "none",
            "description": "All Systems Operational"
        },
        "components": [],
        "incidents": [],
        "scheduled_maintenances": []
    })
}

pub fn client(transport: &MockTransport, registry: &SessionRegistry) -> StatusClient {
    StatusClient::builder()
        .base_url(BASE_URL)
        .transport(Arc::new(transport.clone()))
        .registry(registry.clone())
        .build()
        .expect("mock client should build")
}

pub fn url(path: &str) -> String {
    format!("{}{}", BASE_URL, path)
}
