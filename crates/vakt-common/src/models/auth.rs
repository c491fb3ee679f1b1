use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Credential model (safe for client responses -- no password)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub credential_id: i64,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub iss: String,
    pub exp: i64,
    pub iat: i64,
}
