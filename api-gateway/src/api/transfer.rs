//! Transfer API handler

use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};
use common::model::account::{Account, TransferRequest};

use crate::api::decode_body;
use crate::error::ApiError;
use crate::AppState;

/// Set the balance of `toAccount` to `amount`
///
/// This is an overwrite of a single account; no source account is debited.
#[utoipa::path(
    put,
    path = "/transfer",
    request_body = TransferRequest,
    responses(
        (status = 200, description = "Account after the balance change", body = Account),
        (status = 400, description = "Invalid request or account not found", body = crate::error::ErrorResponse)
    ),
    tag = "transfer"
)]
pub async fn transfer(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Account>, ApiError> {
    let request: TransferRequest = decode_body(&body)?;
    let account = state.account_service
        .transfer(request.to_account, request.amount)
        .await?;
    Ok(Json(account))
}
