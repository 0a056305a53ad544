//! Integration tests for the module-level convenience functions.
//!
//! Everything runs against the in-memory transport. The named functions pick
//! it up through `api::set_default_builder`; only one test in this binary
//! touches that default.

mod common;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use common::{url, Behavior, MockTransport, BASE_URL};
use discord_status::api;
use discord_status::{Endpoint, JsonResponse, SdkError, SdkResult, SessionRegistry, StatusClient};

type PendingCall = Pin<Box<dyn Future<Output = SdkResult<JsonResponse>>>>;

fn mock_builder(
    transport: &MockTransport,
    registry: &SessionRegistry,
) -> discord_status::StatusClientBuilder {
    StatusClient::builder()
        .base_url(BASE_URL)
        .transport(Arc::new(transport.clone()))
        .registry(registry.clone())
}

#[tokio::test]
async fn test_named_functions_hit_their_endpoints() {
    let transport = MockTransport::new();
    let registry = SessionRegistry::new();
    api::set_default_builder(mock_builder(&transport, &registry));

    let calls: Vec<(Endpoint, PendingCall)> = vec![
        (Endpoint::Summary, Box::pin(api::get_summary())),
        (Endpoint::Status, Box::pin(api::get_status())),
        (Endpoint::Components, Box::pin(api::get_components())),
        (Endpoint::Incidents, Box::pin(api::get_incidents())),
        (Endpoint::UnresolvedIncidents, Box::pin(api::get_unresolved_incidents())),
        (Endpoint::Maintenances, Box::pin(api::get_maintenances())),
        (Endpoint::UpcomingMaintenances, Box::pin(api::get_upcoming_maintenances())),
        (Endpoint::ActiveMaintenances, Box::pin(api::get_active_maintenances())),
    ];
    assert_eq!(calls.len(), Endpoint::ALL.len());

    for (i, (endpoint, call)) in calls.into_iter().enumerate() {
        let body = call.await.unwrap().expect("body should be present");
        assert!(body.is_object(), "{endpoint}");
        assert_eq!(transport.requests().len(), i + 1, "{endpoint}");
        assert_eq!(transport.requests().last(), Some(&url(endpoint.path())), "{endpoint}");
        assert!(registry.is_empty(), "{endpoint}");
    }

    api::reset_default_builder();
    assert_eq!(transport.sessions_opened(), 8);
    assert!(transport.all_sessions_closed());
}

#[tokio::test]
async fn test_get_with_returns_objects_and_closes() {
    let transport = MockTransport::new();
    let registry = SessionRegistry::new();

    for endpoint in Endpoint::ALL {
        let body = api::get_with(mock_builder(&transport, &registry), endpoint)
            .await
            .unwrap()
            .expect("body should be present");
        assert!(body.is_object(), "{endpoint}");
        assert_eq!(transport.request_count(&url(endpoint.path())), 1, "{endpoint}");
    }

    assert_eq!(transport.sessions_opened(), 8);
    assert!(transport.all_sessions_closed());
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_get_with_closes_on_error() {
    let transport = MockTransport::new();
    let registry = SessionRegistry::new();
    transport.set_behavior(Behavior::TransportFailure);

    let result = api::get_with(mock_builder(&transport, &registry), Endpoint::Status).await;

    assert!(matches!(result, Err(SdkError::Transport(_))));
    assert!(transport.all_sessions_closed());
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_get_with_respects_silencing() {
    let transport = MockTransport::new();
    let registry = SessionRegistry::new();
    transport.set_behavior(Behavior::TransportFailure);

    let result = api::get_with(
        mock_builder(&transport, &registry).silence_exc(true),
        Endpoint::ActiveMaintenances,
    )
    .await;

    assert!(matches!(result, Ok(None)));
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_get_with_build_failure_opens_nothing() {
    let transport = MockTransport::new();
    let registry = SessionRegistry::new();

    let result = api::get_with(
        mock_builder(&transport, &registry).base_url("status.test"),
        Endpoint::Summary,
    )
    .await;

    assert!(matches!(result, Err(SdkError::Config(_))));
    assert_eq!(transport.sessions_opened(), 0);
    assert!(registry.is_empty());
}
