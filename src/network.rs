//! Network constants for the status page API.

use std::time::Duration;

/// Default status page host.
pub const DEFAULT_BASE_URL: &str = "https://discordstatus.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of idle pooled connections kept per host.
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// `User-Agent` sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("discord-status/", env!("CARGO_PKG_VERSION"));
