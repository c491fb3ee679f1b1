pub mod auth;
pub mod middleware;

use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{routing::get, routing::post, Json, Router};
use serde_json::json;
use std::sync::Arc;

/// GET /api/config -- public endpoint returning server configuration for clients
async fn get_config(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "issuer": state.config.auth.issuer,
        "token_ttl_secs": state.config.auth.token_ttl_secs,
    }))
}

pub fn build_api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        // Public config endpoint
        .route("/config", get(get_config))
        // Auth routes
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .with_state(state)
}
