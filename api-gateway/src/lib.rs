//! HTTP gateway for the bank: routing, JSON translation and token gating

pub mod api;
pub mod auth;
pub mod config;
pub mod error;

use std::sync::Arc;

use account_service::AccountService;
use axum::{
    middleware,
    routing::{get, put},
    Json, Router,
};
use utoipa::OpenApi;

use crate::api::{
    account::{create_account, delete_account, get_account_by_id, list_accounts, update_account},
    method_not_allowed,
    transfer::transfer,
};
use crate::auth::{require_account_token, TokenKeys};

/// App state shared across handlers
pub struct AppState {
    /// Account service
    pub account_service: Arc<AccountService>,
    /// Keys for minting and verifying account tokens
    pub token_keys: TokenKeys,
}

impl AppState {
    pub fn new(account_service: Arc<AccountService>, jwt_secret: &str) -> Self {
        Self {
            account_service,
            token_keys: TokenKeys::new(jwt_secret),
        }
    }
}

/// API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        api::account::list_accounts,
        api::account::create_account,
        api::account::get_account_by_id,
        api::account::update_account,
        api::account::delete_account,
        api::transfer::transfer,
    ),
    components(
        schemas(
            common::model::account::Account,
            common::model::account::CreateAccountRequest,
            common::model::account::TransferRequest,
            api::account::DeleteResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "account", description = "Account management endpoints"),
        (name = "transfer", description = "Balance transfer endpoint")
    ),
    info(
        title = "Bank API",
        version = "1.0.0",
        description = "JSON API for account management and balance transfers"
    )
)]
pub struct ApiDoc;

/// Build the router with every route wired to `state`
///
/// Methods a path does not route answer 400 rather than 405. The token gate
/// wraps the whole `/account/:id` route, fallback included.
pub fn create_router(state: Arc<AppState>) -> Router {
    let account_with_id = get(get_account_by_id)
        .put(update_account)
        .delete(delete_account)
        .fallback(method_not_allowed)
        .layer(middleware::from_fn_with_state(state.clone(), require_account_token));

    Router::new()
        .route(
            "/account",
            get(list_accounts).post(create_account).fallback(method_not_allowed),
        )
        .route("/account/:id", account_with_id)
        .route("/transfer", put(transfer).fallback(method_not_allowed))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .with_state(state)
}
