use httpmock::prelude::*;
use tracing_test::traced_test;
use url::Url;

use etwin_client::{Auth, ClientError, EtwinClient, HttpEtwinClient};
use etwin_core::auth::AuthContext;
use etwin_core::user::{MaybeCompleteUser, UserId};

const DEMURGOS_ID: &str = "9f310484-963b-446b-af69-797feec6813f";

fn client_for(server: &MockServer) -> HttpEtwinClient {
    let base = Url::parse(&server.base_url()).unwrap();
    HttpEtwinClient::new(base).unwrap()
}

fn demurgos_id() -> UserId {
    DEMURGOS_ID.parse().unwrap()
}

fn simple_user_body() -> serde_json::Value {
    serde_json::json!({
        "id": DEMURGOS_ID,
        "display_name": { "current": { "value": "Demurgos" } },
        "is_administrator": true,
    })
}

#[tokio::test]
async fn guest_get_user_fetches_public_view() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path(format!("/api/v1/users/{DEMURGOS_ID}"));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(simple_user_body());
    });

    let client = client_for(&server);
    let user = client.get_user(&Auth::Guest, demurgos_id()).await.unwrap();

    mock.assert();
    match user {
        MaybeCompleteUser::Simple(user) => {
            assert_eq!(user.id, demurgos_id());
            assert_eq!(user.display_name.current.value.as_str(), "Demurgos");
            assert!(user.is_administrator);
        }
        MaybeCompleteUser::Complete(user) => panic!("expected public view, got {user:?}"),
    }
}

#[tokio::test]
async fn guest_requests_carry_no_authorization_header() {
    let server = MockServer::start();
    // Only matches when an Authorization header is present; a guest request
    // must fall through to the mock server's 404.
    let authed_only = server.mock(|when, then| {
        when.method(GET)
            .path(format!("/api/v1/users/{DEMURGOS_ID}"))
            .header_exists("authorization");
        then.status(200).json_body(simple_user_body());
    });

    let client = client_for(&server);
    let err = client
        .get_user(&Auth::Guest, demurgos_id())
        .await
        .unwrap_err();

    assert_eq!(authed_only.hits(), 0);
    assert!(matches!(err, ClientError::NotFound { .. }));
}

#[tokio::test]
async fn token_get_self_sends_bearer_header() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/auth/self")
            .header("authorization", "Bearer super-secret");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!({
                "type": "AccessToken",
                "scope": "Default",
                "client": {
                    "id": "d19e61a3-83d3-410f-84ec-49aaab841559",
                    "key": "eternalfest@clients",
                    "display_name": "Eternalfest",
                },
                "user": {
                    "id": DEMURGOS_ID,
                    "display_name": { "current": { "value": "Demurgos" } },
                },
            }));
    });

    let client = client_for(&server);
    let context = client
        .get_self(&Auth::from_token("super-secret"))
        .await
        .unwrap();

    mock.assert();
    match context {
        AuthContext::AccessToken(context) => {
            assert_eq!(context.user.id, demurgos_id());
            assert_eq!(context.client.display_name, "Eternalfest");
        }
        other => panic!("expected AccessToken context, got {other:?}"),
    }
}

#[tokio::test]
async fn guest_get_self_resolves_guest_context() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1/auth/self");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!({ "type": "Guest", "scope": "Default" }));
    });

    let client = client_for(&server);
    let context = client.get_self(&Auth::Guest).await.unwrap();

    mock.assert();
    assert!(context.is_guest());
}

#[traced_test]
#[tokio::test]
async fn instrumented_operations_execute_under_tracing() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(format!("/api/v1/users/{DEMURGOS_ID}"));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(simple_user_body());
    });

    let client = client_for(&server);
    let result = client.get_user(&Auth::Guest, demurgos_id()).await;

    // Completing under the captured subscriber means the operation span and
    // the request/response events (method, resolved URL, status) were
    // recorded without panicking.
    assert!(result.is_ok());
}

#[tokio::test]
async fn missing_user_maps_to_not_found() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path(format!("/api/v1/users/{DEMURGOS_ID}"));
        then.status(404);
    });

    let client = client_for(&server);
    let err = client
        .get_user(&Auth::Guest, demurgos_id())
        .await
        .unwrap_err();

    mock.assert();
    match err {
        ClientError::NotFound { url } => {
            assert!(url.path().ends_with(&format!("/users/{DEMURGOS_ID}")));
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_maps_to_api_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/auth/self");
        then.status(500);
    });

    let client = client_for(&server);
    let err = client.get_self(&Auth::Guest).await.unwrap_err();

    match err {
        ClientError::Api { status, .. } => assert_eq!(status.as_u16(), 500),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_body_maps_to_unexpected_response() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/auth/self");
        then.status(200)
            .header("content-type", "text/html")
            .body("<html>not json</html>");
    });

    let client = client_for(&server);
    let err = client.get_self(&Auth::Guest).await.unwrap_err();

    assert!(matches!(err, ClientError::UnexpectedResponse { .. }));
}
