//! Session registry. Tracks every open client session so they can be
//! closed in bulk.
//!
//! Each [`StatusClient`](crate::client::StatusClient) registers its session
//! under its [`ClientId`] on construction and removes it on close. A registry
//! is a cheap, cloneable handle; clones share the same map. Clients use the
//! process-wide [`SessionRegistry::global`] unless built with another one.
//!
//! Nothing is registered to run at exit implicitly. Applications that want
//! leftover sessions released when `main` returns hold the guard from
//! [`install_exit_guard`].

use crate::error::SdkError;
use crate::transport::Session;

use futures::future::join_all;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

lazy_static! {
    static ref GLOBAL_REGISTRY: SessionRegistry = SessionRegistry::new();
}

static NEXT_CLIENT_ID: AtomicU64 = AtomicU64::new(1);

// ─── ClientId ────────────────────────────────────────────────────────────────

/// Process-unique identity of a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(u64);

impl ClientId {
    pub(crate) fn next() -> Self {
        Self(NEXT_CLIENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "client-{}", self.0)
    }
}

// ─── CleanupReport ───────────────────────────────────────────────────────────

/// Outcome of a bulk close.
#[derive(Debug, Default)]
pub struct CleanupReport {
    /// Sessions closed without error.
    pub closed: usize,
    /// Sessions whose close failed. They are removed from the registry anyway.
    pub failures: Vec<(ClientId, SdkError)>,
}

impl CleanupReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total sessions the sweep handled.
    pub fn total(&self) -> usize {
        self.closed + self.failures.len()
    }
}

// ─── SessionRegistry ─────────────────────────────────────────────────────────

/// Map of live client identities to their open sessions.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<ClientId, Arc<dyn Session>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by clients that were not given one.
    pub fn global() -> &'static SessionRegistry {
        &GLOBAL_REGISTRY
    }

    // Every critical section leaves the map consistent, so a poisoned lock
    // is still safe to use.
    fn lock(&self) -> MutexGuard<'_, HashMap<ClientId, Arc<dyn Session>>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn insert(&self, id: ClientId, session: Arc<dyn Session>) {
        self.lock().insert(id, session);
        tracing::debug!(client = %id, "Registered session");
    }

    /// Remove an entry. Returns `None` if it was already gone.
    pub(crate) fn remove(&self, id: ClientId) -> Option<Arc<dyn Session>> {
        let removed = self.lock().remove(&id);
        if removed.is_some() {
            tracing::debug!(client = %id, "Deregistered session");
        }
        removed
    }

    pub fn contains(&self, id: ClientId) -> bool {
        self.lock().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Whether two handles share the same underlying map.
    pub fn same_as(&self, other: &SessionRegistry) -> bool {
        Arc::ptr_eq(&self.sessions, &other.sessions)
    }

    /// Close every registered session and empty the registry.
    ///
    /// Sessions are closed concurrently. A failing close is reported in the
    /// returned [`CleanupReport`] and logged; it never stops the others.
    pub async fn close_all(&self) -> CleanupReport {
        let drained: Vec<(ClientId, Arc<dyn Session>)> = self.lock().drain().collect();
        if drained.is_empty() {
            return CleanupReport::default();
        }

        let results = join_all(drained.iter().map(|(_, session)| session.close())).await;

        let mut report = CleanupReport::default();
        for ((id, _), result) in drained.into_iter().zip(results) {
            match result {
                Ok(()) => report.closed += 1,
                Err(e) => {
                    tracing::warn!(client = %id, error = %e, "Failed to close session");
                    report.failures.push((id, e));
                }
            }
        }

        tracing::debug!(
            closed = report.closed,
            failed = report.failures.len(),
            "Closed all registered sessions"
        );
        report
    }

    /// Blocking form of [`close_all`](Self::close_all).
    ///
    /// Drives the close futures on the calling thread, so it works where no
    /// async runtime is running, such as at the end of `main` or in a `Drop`.
    pub fn close_all_blocking(&self) -> CleanupReport {
        if self.is_empty() {
            return CleanupReport::default();
        }
        futures::executor::block_on(self.close_all())
    }
}

impl fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("sessions", &self.len())
            .finish()
    }
}

// ─── Exit guard ──────────────────────────────────────────────────────────────

/// Closes every session left in a registry when dropped.
///
/// The sweep runs at most once per guard, whether triggered by
/// [`run_now`](Self::run_now) or by `Drop`.
#[must_use = "sessions are only swept when the guard is dropped"]
#[derive(Debug)]
pub struct ExitGuard {
    registry: SessionRegistry,
    fired: AtomicBool,
}

impl ExitGuard {
    pub fn new(registry: SessionRegistry) -> Self {
        Self {
            registry,
            fired: AtomicBool::new(false),
        }
    }

    /// Run the sweep now. Returns `None` if this guard already ran it.
    pub fn run_now(&self) -> Option<CleanupReport> {
        if self.fired.swap(true, Ordering::SeqCst) {
            return None;
        }
        Some(self.registry.close_all_blocking())
    }

    pub fn has_run(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}

impl Drop for ExitGuard {
    fn drop(&mut self) {
        self.run_now();
    }
}

/// Guard over the global registry. Keep it alive for the life of `main`:
///
/// ```rust,ignore
/// fn main() {
///     let _sessions = discord_status::install_exit_guard();
///     // ...
/// }
/// ```
pub fn install_exit_guard() -> ExitGuard {
    ExitGuard::new(SessionRegistry::global().clone())
}
