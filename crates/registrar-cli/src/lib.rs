//! # Registrar CLI
//!
//! Bootstrap and demo data for the Registrar API.
//!
//! The seeding functions work against any [`registrar_db::Store`], so the
//! server can seed its store at startup and the test suites can seed an
//! in-memory store the same way the binary seeds PostgreSQL.
//!
//! ```ignore
//! use registrar_cli::seeder::seed_bootstrap;
//! use registrar_config::SeedAccounts;
//!
//! let summary = seed_bootstrap(store.as_ref(), &SeedAccounts::from_env()).await?;
//! ```

pub mod seeder;
