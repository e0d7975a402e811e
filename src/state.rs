use std::sync::Arc;

use registrar_config::{CorsConfig, DatabaseConfig, JwtConfig, RateLimitConfig};
use registrar_db::{MemoryStore, Store, connect_store};

#[derive(Clone, Debug)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
}

impl AppState {
    /// State over an explicit store with default CORS and rate limits.
    pub fn new(store: Arc<dyn Store>, jwt_config: JwtConfig) -> Self {
        Self {
            store,
            jwt_config,
            cors_config: CorsConfig::default(),
            rate_limit_config: RateLimitConfig::default(),
        }
    }

    /// Fresh in-memory state, mostly useful in tests.
    pub fn in_memory(jwt_config: JwtConfig) -> Self {
        Self::new(Arc::new(MemoryStore::new()), jwt_config)
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let store = connect_store(&DatabaseConfig::from_env()).await?;

    Ok(AppState {
        store,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        rate_limit_config: RateLimitConfig::from_env(),
    })
}
