use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

/// Externally-visible error kinds, rendered as uniform `{code, error}` JSON.
///
/// Codes are part of the wire contract consumed by existing clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Internal,
    BadRequest(String),
    TokenCreation,
    DuplicateUsername,
    InvalidLoginParameter,
    InvalidToken,
}

impl ApiError {
    pub fn code(&self) -> u16 {
        match self {
            ApiError::Internal => 1000,
            ApiError::BadRequest(_) => 1001,
            ApiError::TokenCreation => 1003,
            ApiError::DuplicateUsername => 2000,
            ApiError::InvalidLoginParameter => 2001,
            ApiError::InvalidToken => 2002,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Internal | ApiError::TokenCreation => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_)
            | ApiError::DuplicateUsername
            | ApiError::InvalidLoginParameter => StatusCode::BAD_REQUEST,
            ApiError::InvalidToken => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ApiError::Internal => "Unexpected error on the server. Please try again later.",
            ApiError::BadRequest(_) => "Invalid parameters.",
            ApiError::TokenCreation => "Token creation error.",
            ApiError::DuplicateUsername => "Username exists",
            ApiError::InvalidLoginParameter => "Invalid username/password.",
            ApiError::InvalidToken => "Invalid or expired token.",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(detail) => write!(f, "{} ({})", self.message(), detail),
            _ => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "code": self.code(),
            "error": self.message(),
        });
        if let ApiError::BadRequest(detail) = &self {
            body["detail"] = json!(detail);
        }
        (self.status(), Json(body)).into_response()
    }
}
