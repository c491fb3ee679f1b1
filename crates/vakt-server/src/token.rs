use crate::config::AuthConfig;
use anyhow::{Context, Result};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use vakt_common::models::auth::Claims;

/// Issues and validates signed, time-bounded access tokens.
///
/// Built once at startup from the auth config; holds no mutable state, so a
/// single instance is safe to share across request handlers.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl_secs: i64,
}

impl TokenCodec {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer.clone(),
            ttl_secs: config.token_ttl_secs,
        }
    }

    /// Create a signed token carrying the credential id as subject.
    ///
    /// The codec does not check that the id exists; callers must only pass
    /// ids of records they have just looked up.
    pub fn issue(&self, credential_id: i64) -> Result<String> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: credential_id,
            iss: self.issuer.clone(),
            iat: now,
            exp: now + self.ttl_secs,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS512), &claims, &self.encoding_key)
            .context("Failed to sign access token")
    }

    /// Verify signature, issuer and expiry; return the embedded credential id.
    ///
    /// All failure causes (malformed token, bad signature, wrong issuer,
    /// expired) collapse to `None`.
    pub fn validate(&self, token: &str) -> Option<i64> {
        let mut validation = Validation::new(Algorithm::HS512);
        validation.set_issuer(&[&self.issuer]);
        // The validity window is short enough that clock-skew leeway would
        // meaningfully extend it.
        validation.leeway = 0;
        match jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => Some(data.claims.sub),
            Err(_) => None,
        }
    }
}
