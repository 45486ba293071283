//! Account tokens: minting and the ownership gate on `/account/{id}`
//!
//! A token is an HMAC-signed JWT carrying the account `number`. The gate
//! accepts a request only when the token verifies and its number equals the
//! number of the account named in the path.

use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::Response,
};
use common::model::account::Account;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::AppState;

/// Request header carrying the token
pub const TOKEN_HEADER: &str = "x-jwt-token";

/// Value written into the `expiresAt` claim of minted tokens. Never enforced.
pub const TOKEN_EXPIRES_AT: i64 = 15000;

/// Token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub expires_at: i64,
    pub account_number: i64,
}

/// Signing and verification keys derived from the shared secret
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenKeys {
    pub fn new(secret: &str) -> Self {
        // Any HMAC variant is accepted; expiry and other registered claims are not checked
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Mint a token for `account`
    pub fn create_token(&self, account: &Account) -> jsonwebtoken::errors::Result<String> {
        let claims = Claims {
            expires_at: TOKEN_EXPIRES_AT,
            account_number: account.number,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    /// Verify the signature of `token` and return its claims
    pub fn validate_token(&self, token: &str) -> jsonwebtoken::errors::Result<Claims> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
    }
}

/// Middleware guarding `/account/{id}`
///
/// A path id that is not an integer is passed through so the handler can
/// report it; it cannot name an account, so nothing is exposed.
pub async fn require_account_token(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Ok(id) = raw_id.parse::<i64>() else {
        return Ok(next.run(request).await);
    };

    let token = request
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            warn!("Missing {} header for account {}", TOKEN_HEADER, id);
            ApiError::InvalidToken
        })?;

    let claims = state.token_keys.validate_token(token).map_err(|e| {
        warn!("Token rejected for account {}: {}", id, e);
        ApiError::InvalidToken
    })?;

    let account = state.account_service.get_account(id).await.map_err(|e| {
        warn!("Token check could not load account {}: {}", id, e);
        ApiError::InvalidToken
    })?;

    if claims.account_number != account.number {
        warn!(
            "Token for account number {} used on account {} (number {})",
            claims.account_number, id, account.number
        );
        return Err(ApiError::InvalidToken);
    }

    debug!("Token accepted for account {}", id);
    Ok(next.run(request).await)
}
