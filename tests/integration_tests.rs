// File: tests/integration_tests.rs
//
// End-to-end flow through the gateway over the in-memory store: create an
// account, use its token on the gated routes, move its balance, delete it.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use gobank::account_service::{AccountService, RepositoryType};
use gobank::api_gateway::auth::TOKEN_HEADER;
use gobank::api_gateway::{create_router, AppState};
use gobank::common::model::account::Account;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn call(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(TOKEN_HEADER, token);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_account_lifecycle() {
    let service = AccountService::with_repository(RepositoryType::InMemory).await.unwrap();
    let state = Arc::new(AppState::new(Arc::new(service), "integration-secret"));
    let app = create_router(state.clone());

    // Create
    let (status, created) = call(
        &app,
        "POST",
        "/account",
        None,
        Some(json!({"firstName": "Barbara", "lastName": "Liskov"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let account: Account = serde_json::from_value(created).unwrap();

    // The token is only logged by the server; mint the same one here
    let token = state.token_keys.create_token(&account).unwrap();
    let uri = format!("/account/{}", account.id);

    // Read through the gate
    let (status, fetched) = call(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["lastName"], "Liskov");

    // Balance overwrite is visible on the next read
    let (status, _) = call(
        &app,
        "PUT",
        "/transfer",
        None,
        Some(json!({"toAccount": account.id, "amount": 1234})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, fetched) = call(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(fetched["balance"], 1234);

    // Delete, then the token no longer opens anything
    let (status, deleted) = call(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({"deleted": account.id}));

    let (status, _) = call(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, listed) = call(&app, "GET", "/account", None, None).await;
    assert_eq!(listed, json!([]));
}
