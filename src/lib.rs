//! # discord-status
//!
//! An async Rust client for the Discord status page API.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: Error types, network constants, the static endpoint table
//! 2. **Transport**: `Transport`/`Session` traits with a `reqwest` implementation
//! 3. **Registry**: `SessionRegistry` tracking open sessions for bulk cleanup
//! 4. **Client**: `StatusClient` with one method per endpoint and a
//!    configurable error-silencing policy
//! 5. **Convenience**: free functions that use a short-lived client per call
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use discord_status::prelude::*;
//!
//! let _sessions = install_exit_guard();
//!
//! let client = StatusClient::builder().silence_exc(true).build()?;
//! if let Some(summary) = client.get_summary().await? {
//!     println!("{}", summary["status"]["description"]);
//! }
//! client.close().await?;
//!
//! let incidents = discord_status::api::get_unresolved_incidents().await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Unified SDK error types.
pub mod error;

/// Network defaults.
pub mod network;

/// The fixed set of status page endpoints.
#[macro_use]
pub mod endpoint;

// ── Layer 2: Transport ───────────────────────────────────────────────────────

/// Session traits and the default HTTP transport.
pub mod transport;

// ── Layer 3: Registry ────────────────────────────────────────────────────────

/// Registry of open sessions, bulk cleanup and the exit guard.
pub mod registry;

// ── Layer 4: Client ──────────────────────────────────────────────────────────

/// `StatusClient`: the primary entry point.
pub mod client;

// ── Layer 5: Convenience ─────────────────────────────────────────────────────

/// One-call-per-client free functions.
pub mod api;

pub use api::{
    get_active_maintenances, get_components, get_incidents, get_maintenances, get_status,
    get_summary, get_unresolved_incidents, get_upcoming_maintenances,
};
pub use client::{JsonResponse, StatusClient, StatusClientBuilder};
pub use endpoint::Endpoint;
pub use error::{SdkError, SdkResult, TransportError};
pub use registry::{install_exit_guard, CleanupReport, ClientId, ExitGuard, SessionRegistry};

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Client
    pub use crate::client::{JsonResponse, StatusClient, StatusClientBuilder};
    pub use crate::endpoint::Endpoint;

    // Errors
    pub use crate::error::{SdkError, SdkResult, TransportError};

    // Network
    pub use crate::network::DEFAULT_BASE_URL;

    // Registry
    pub use crate::registry::{
        install_exit_guard, CleanupReport, ClientId, ExitGuard, SessionRegistry,
    };

    // Transport
    pub use crate::transport::{Response, Session, SessionOptions, Transport};
    #[cfg(feature = "http")]
    pub use crate::transport::{HttpSession, HttpTransport};
}
