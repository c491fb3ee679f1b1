use crate::errors::ApiError;
use crate::service::RegisterOutcome;
use crate::state::AppState;
use crate::web::api::middleware::AuthUser;
use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use vakt_common::models::auth::Credential;
use vakt_common::validation::{validate_login, validate_registration};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /api/auth/register
#[tracing::instrument(skip(state, req))]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    if let Err(e) = validate_registration(&req.username, &req.password, &req.email) {
        return ApiError::BadRequest(e.to_string()).into_response();
    }

    match state
        .auth
        .register(&req.username, &req.password, &req.email)
        .await
    {
        Ok(RegisterOutcome::Created(credential_id)) => {
            tracing::info!(credential_id, "Registered new credential");
            Json(true).into_response()
        }
        Ok(RegisterOutcome::DuplicateUsername) => ApiError::DuplicateUsername.into_response(),
        Err(e) => {
            tracing::error!("Store error during registration: {:#}", e);
            ApiError::Internal.into_response()
        }
    }
}

/// POST /api/auth/login
#[tracing::instrument(skip(state, req))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    if let Err(e) = validate_login(&req.username, &req.password) {
        return ApiError::BadRequest(e.to_string()).into_response();
    }

    let cred = match state.auth.login(&req.username, &req.password).await {
        Ok(Some(c)) => c,
        Ok(None) => return ApiError::InvalidLoginParameter.into_response(),
        Err(e) => {
            tracing::error!("Store error during login: {:#}", e);
            return ApiError::Internal.into_response();
        }
    };

    match state.tokens.issue(cred.credential_id) {
        Ok(token) => Json(TokenResponse { token }).into_response(),
        Err(e) => {
            tracing::error!("Failed to issue access token: {:#}", e);
            ApiError::TokenCreation.into_response()
        }
    }
}

/// GET /api/auth/me
#[tracing::instrument(skip(state))]
pub async fn me(State(state): State<Arc<AppState>>, auth: AuthUser) -> impl IntoResponse {
    match state.auth.get(auth.0).await {
        Ok(Some(cred)) => Json(Credential {
            credential_id: cred.credential_id,
            username: cred.username,
            email: cred.email,
            is_active: cred.is_active,
            created_at: cred.created_at,
        })
        .into_response(),
        // The record may have been removed since the token was issued;
        // validation only proves signature and expiry.
        Ok(None) => ApiError::InvalidToken.into_response(),
        Err(e) => {
            tracing::error!("Store error looking up credential: {:#}", e);
            ApiError::Internal.into_response()
        }
    }
}
