use crate::error::Result as ServerErrorResult;

use onigiri_auth::{AuthService, ProviderRegistry, SigningKey, TokenIssuer};
use onigiri_config::{Config, ConfigError};
use onigiri_db::UserRepository;

use std::sync::Arc;

use log::info;
use sqlx::SqlitePool;

/// Shared state for all handlers. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(auth: AuthService, pool: SqlitePool) -> Self {
        Self { auth, pool }
    }

    /// Wire the auth core to a SQLite directory using validated config.
    ///
    /// Provider configuration is resolved here, so a bad providers file
    /// stops startup instead of failing individual requests.
    pub fn from_config(config: &Config, pool: SqlitePool) -> ServerErrorResult<Self> {
        let secret = config
            .auth
            .jwt_secret
            .clone()
            .ok_or_else(|| ConfigError::auth("auth.jwt_secret is required"))?;
        let tokens = TokenIssuer::new(&SigningKey::new(secret.into_bytes())?);

        let providers = ProviderRegistry::new(config.load_providers()?)?;
        info!(
            "Identity providers: [{}]",
            providers.names().collect::<Vec<_>>().join(", ")
        );

        let directory = Arc::new(UserRepository::new(pool.clone()));
        let auth = AuthService::new(directory, tokens, providers);

        Ok(Self::new(auth, pool))
    }
}
