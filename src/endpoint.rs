//! Static endpoint table.
//!
//! Every read-only endpoint is listed once in `with_endpoints!`. The
//! [`Endpoint`] enum, the `StatusClient` methods and the module-level
//! functions are all generated from that list, so a method name can never
//! point at another endpoint's path.

use serde::{Deserialize, Serialize};

/// Hands the endpoint list to `$callback` as
/// `/// docs  method_name => Variant("/path"),` entries.
macro_rules! with_endpoints {
    ($callback:ident) => {
        $callback! {
            /// Status indicator, component statuses, unresolved incidents, and any
            /// upcoming or in-progress scheduled maintenances.
            get_summary => Summary("/api/v2/summary.json"),
            /// Status rollup for the whole page. The indicator is one of `none`,
            /// `minor`, `major` or `critical`, with a human description.
            get_status => Status("/api/v2/status.json"),
            /// Components of the page, each with its status.
            get_components => Components("/api/v2/components.json"),
            /// The 50 most recent incidents, including all unresolved ones.
            get_incidents => Incidents("/api/v2/incidents.json"),
            /// Unresolved incidents.
            get_unresolved_incidents => UnresolvedIncidents("/api/v2/incidents/unresolved.json"),
            /// The 50 most recent scheduled maintenances.
            get_maintenances => Maintenances("/api/v2/scheduled-maintenances.json"),
            /// Upcoming scheduled maintenances.
            get_upcoming_maintenances =>
                UpcomingMaintenances("/api/v2/scheduled-maintenances/upcoming.json"),
            /// Active scheduled maintenances.
            get_active_maintenances =>
                ActiveMaintenances("/api/v2/scheduled-maintenances/active.json"),
        }
    };
}

macro_rules! endpoint_enum {
    ($($(#[$doc:meta])* $name:ident => $variant:ident($path:literal),)*) => {
        /// A fixed status page endpoint.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum Endpoint {
            $($(#[$doc])* $variant,)*
        }

        impl Endpoint {
            /// All endpoints, in declaration order.
            pub const ALL: [Endpoint; 8] = [$(Self::$variant,)*];

            /// Path of the endpoint on the status page host.
            pub fn path(&self) -> &'static str {
                match self {
                    $(Self::$variant => $path,)*
                }
            }

            /// Name of the client method (and module-level function) for this endpoint.
            pub fn method_name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($name),)*
                }
            }
        }
    };
}

with_endpoints!(endpoint_enum);

impl Endpoint {
    /// Full URL of the endpoint under `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.method_name())
    }
}
