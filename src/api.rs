//! Module-level convenience functions.
//!
//! Each function builds a short-lived [`StatusClient`], performs one call and
//! closes the client again, even when the call fails. Use a long-lived client
//! instead when making several calls.
//!
//! Clients come from [`StatusClient::builder`] unless a different default
//! was installed with [`set_default_builder`].

use crate::client::{JsonResponse, StatusClient, StatusClientBuilder};
use crate::endpoint::Endpoint;
use crate::error::SdkResult;

use futures::FutureExt;
use lazy_static::lazy_static;
use std::sync::{PoisonError, RwLock};

lazy_static! {
    static ref DEFAULT_BUILDER: RwLock<Option<StatusClientBuilder>> = RwLock::new(None);
}

/// Use `builder` for every later module-level call.
pub fn set_default_builder(builder: StatusClientBuilder) {
    *DEFAULT_BUILDER
        .write()
        .unwrap_or_else(PoisonError::into_inner) = Some(builder);
}

/// Go back to [`StatusClient::builder`] defaults.
pub fn reset_default_builder() {
    *DEFAULT_BUILDER
        .write()
        .unwrap_or_else(PoisonError::into_inner) = None;
}

fn default_builder() -> StatusClientBuilder {
    DEFAULT_BUILDER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .unwrap_or_default()
}

/// One-shot fetch of any endpoint with the default builder.
pub async fn get(endpoint: Endpoint) -> SdkResult<JsonResponse> {
    get_with(default_builder(), endpoint).await
}

/// One-shot fetch with a client built from `builder`.
pub async fn get_with(builder: StatusClientBuilder, endpoint: Endpoint) -> SdkResult<JsonResponse> {
    let client = builder.build()?;
    client.scoped(move |c| c.get(endpoint).boxed()).await
}

macro_rules! free_functions {
    ($($(#[$doc:meta])* $name:ident => $variant:ident($path:literal),)*) => {
        $(
            $(#[$doc])*
            pub async fn $name() -> SdkResult<JsonResponse> {
                get(Endpoint::$variant).await
            }
        )*
    };
}

with_endpoints!(free_functions);
