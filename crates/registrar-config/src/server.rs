//! HTTP server and bootstrap settings.
//!
//! # Environment Variables
//!
//! - `SERVER_HOST` (default `0.0.0.0`), `SERVER_PORT` (default `3000`)
//! - `SEED_ON_STARTUP`: create the bootstrap accounts at startup (default `true`)
//! - `ADMIN_EMAIL`, `ADMIN_PASSWORD`, `HOD_EMAIL`, `HOD_PASSWORD`: credentials
//!   for the two bootstrap faculty accounts

use std::env;

use crate::env_or;

/// Credentials for the bootstrap Admin and Head of Department accounts.
#[derive(Clone, PartialEq, Eq)]
pub struct SeedAccounts {
    pub admin_email: String,
    pub admin_password: String,
    pub hod_email: String,
    pub hod_password: String,
}

impl std::fmt::Debug for SeedAccounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedAccounts")
            .field("admin_email", &self.admin_email)
            .field("hod_email", &self.hod_email)
            .finish_non_exhaustive()
    }
}

impl Default for SeedAccounts {
    fn default() -> Self {
        Self {
            admin_email: "admin@registrar.local".to_string(),
            admin_password: "admin-change-me".to_string(),
            hod_email: "hod@registrar.local".to_string(),
            hod_password: "hod-change-me".to_string(),
        }
    }
}

impl SeedAccounts {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            admin_email: env::var("ADMIN_EMAIL").unwrap_or(defaults.admin_email),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or(defaults.admin_password),
            hod_email: env::var("HOD_EMAIL").unwrap_or(defaults.hod_email),
            hod_password: env::var("HOD_PASSWORD").unwrap_or(defaults.hod_password),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub seed_on_startup: bool,
    pub seed_accounts: SeedAccounts,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env_or("SERVER_PORT", 3000),
            seed_on_startup: env_or("SEED_ON_STARTUP", true),
            seed_accounts: SeedAccounts::from_env(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
