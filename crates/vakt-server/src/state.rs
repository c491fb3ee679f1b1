use crate::config::ServerConfig;
use crate::service::AuthService;
use crate::token::TokenCodec;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub auth: AuthService,
    pub tokens: Arc<TokenCodec>,
}

impl AppState {
    /// Create a new app state
    pub fn new(config: ServerConfig, auth: AuthService, tokens: TokenCodec) -> Self {
        Self {
            config: Arc::new(config),
            auth,
            tokens: Arc::new(tokens),
        }
    }
}
