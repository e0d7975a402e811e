//! # Registrar DB
//!
//! Storage layer for the Registrar API.
//!
//! - [`entity`]: Table descriptors implemented for every domain entity
//! - [`repository`]: The generic CRUD contract
//! - [`store`]: Repositories grouped per backend, plus the atomic
//!   registration workflows
//! - [`postgres`]: PostgreSQL backend (`PgRepository<E>`, [`PgStore`])
//! - [`memory`]: In-memory backend (`MemoryRepository<E>`, [`MemoryStore`])
//!
//! # Example
//!
//! ```ignore
//! use registrar_config::DatabaseConfig;
//! use registrar_db::{PgStore, Store, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&url, &DatabaseConfig::from_env()).await?;
//! run_migrations(&pool).await?;
//! let store = PgStore::new(pool);
//! let students = store.students().get_all().await?;
//! ```

pub mod entity;
pub mod memory;
pub mod postgres;
pub mod repository;
pub mod store;

use std::sync::Arc;

use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use registrar_config::DatabaseConfig;

pub use entity::Entity;
pub use memory::{MemoryRepository, MemoryStore};
pub use postgres::{PgRepository, PgStore};
pub use repository::Repository;
pub use store::Store;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Opens a PostgreSQL connection pool.
pub async fn init_db_pool(url: &str, config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Builds the store selected by the configuration: PostgreSQL when
/// `DATABASE_URL` is set, otherwise an empty in-memory store.
pub async fn connect_store(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn Store>> {
    match &config.url {
        Some(url) => {
            let pool = init_db_pool(url, config).await?;
            run_migrations(&pool).await?;
            tracing::info!(max_connections = config.max_connections, "Connected to PostgreSQL");
            Ok(Arc::new(PgStore::new(pool)))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using the in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
