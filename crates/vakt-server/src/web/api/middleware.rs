use crate::errors::ApiError;
use crate::state::AppState;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Extractor that validates a Bearer token and provides the credential id
/// embedded in it. Any failure (missing header, malformed header, bad
/// signature, wrong issuer, expired) rejects with the invalid-token error.
#[derive(Debug)]
pub struct AuthUser(pub i64);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));

        let Some(token) = token else {
            return Err(ApiError::InvalidToken.into_response());
        };

        match state.tokens.validate(token) {
            Some(credential_id) => Ok(AuthUser(credential_id)),
            None => Err(ApiError::InvalidToken.into_response()),
        }
    }
}
