//! # Registrar Config
//!
//! Configuration types for the Registrar API, loaded from environment variables.
//!
//! - [`jwt`]: JWT signing secret and token lifetime
//! - [`cors`]: Allowed CORS origins
//! - [`database`]: Connection string and pool size
//! - [`rate_limit`]: API rate limiting configuration
//! - [`server`]: Bind address and bootstrap seeding
//!
//! Every type exposes a `from_env()` constructor that falls back to defaults
//! when a variable is unset or cannot be parsed.
//!
//! # Example
//!
//! ```ignore
//! use registrar_config::{JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let server = ServerConfig::from_env();
//! println!("listening on {}", server.bind_address());
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod rate_limit;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use rate_limit::RateLimitConfig;
pub use server::{SeedAccounts, ServerConfig};

pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
