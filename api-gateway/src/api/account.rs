//! Account API handlers
//!
//! `/account` (list, create) is open; `/account/{id}` (get, update, delete)
//! sits behind the token gate in [`crate::auth`].

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use common::model::account::{Account, CreateAccountRequest};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utoipa::ToSchema;

use crate::api::{decode_body, parse_id};
use crate::error::ApiError;
use crate::AppState;

/// Body returned by a delete
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    /// Id that was deleted
    pub deleted: i64,
}

/// List all accounts
#[utoipa::path(
    get,
    path = "/account",
    responses(
        (status = 200, description = "All accounts", body = [Account]),
        (status = 400, description = "Backend failure", body = crate::error::ErrorResponse)
    ),
    tag = "account"
)]
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Account>>, ApiError> {
    let accounts = state.account_service.list_accounts().await?;
    Ok(Json(accounts))
}

/// Create a new account
///
/// A token for the new account is minted and written to the log only.
#[utoipa::path(
    post,
    path = "/account",
    request_body = CreateAccountRequest,
    responses(
        (status = 200, description = "Account successfully created", body = Account),
        (status = 400, description = "Bad request", body = crate::error::ErrorResponse)
    ),
    tag = "account"
)]
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Account>, ApiError> {
    let request: CreateAccountRequest = decode_body(&body)?;

    let account = state.account_service
        .create_account(&request.first_name, &request.last_name)
        .await?;

    // TODO: hand the token back to the caller once a delivery flow is agreed on
    match state.token_keys.create_token(&account) {
        Ok(token) => info!("JWT token for account {}: {}", account.number, token),
        Err(e) => error!("Failed to mint token for account {}: {}", account.id, e),
    }

    Ok(Json(account))
}

/// Get an account by ID
#[utoipa::path(
    get,
    path = "/account/{id}",
    params(
        ("id" = i64, Path, description = "Account ID"),
        ("x-jwt-token" = String, Header, description = "Token for this account")
    ),
    responses(
        (status = 200, description = "Account details", body = Account),
        (status = 400, description = "Invalid id or account not found", body = crate::error::ErrorResponse),
        (status = 403, description = "Invalid token", body = crate::error::ErrorResponse)
    ),
    tag = "account"
)]
pub async fn get_account_by_id(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Account>, ApiError> {
    let id = parse_id(&raw_id)?;
    let account = state.account_service.get_account(id).await?;
    Ok(Json(account))
}

/// Update the name fields of an account
#[utoipa::path(
    put,
    path = "/account/{id}",
    params(
        ("id" = i64, Path, description = "Account ID"),
        ("x-jwt-token" = String, Header, description = "Token for this account")
    ),
    request_body = CreateAccountRequest,
    responses(
        (status = 200, description = "Updated account", body = Account),
        (status = 400, description = "Invalid request or account not found", body = crate::error::ErrorResponse),
        (status = 403, description = "Invalid token", body = crate::error::ErrorResponse)
    ),
    tag = "account"
)]
pub async fn update_account(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<Account>, ApiError> {
    let id = parse_id(&raw_id)?;
    let request: CreateAccountRequest = decode_body(&body)?;

    let account = state.account_service
        .update_account(id, &request.first_name, &request.last_name)
        .await?;
    Ok(Json(account))
}

/// Delete an account
#[utoipa::path(
    delete,
    path = "/account/{id}",
    params(
        ("id" = i64, Path, description = "Account ID"),
        ("x-jwt-token" = String, Header, description = "Token for this account")
    ),
    responses(
        (status = 200, description = "Account deleted", body = DeleteResponse),
        (status = 400, description = "Invalid id", body = crate::error::ErrorResponse),
        (status = 403, description = "Invalid token", body = crate::error::ErrorResponse)
    ),
    tag = "account"
)]
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_id(&raw_id)?;
    state.account_service.delete_account(id).await?;
    Ok(Json(DeleteResponse { deleted: id }))
}
