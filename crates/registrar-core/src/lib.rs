//! # Registrar Core
//!
//! Core types, errors, and utilities for the Registrar API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: Application error type, error kinds, and HTTP response conversion
//! - [`password`]: bcrypt password hashing and verification
//! - [`serde`]: Custom serde deserialization helpers for patch-style DTOs
//!
//! # Example
//!
//! ```ignore
//! use registrar_core::errors::{AppError, ErrorKind};
//! use registrar_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("No such student exists"));
//! assert_eq!(error.kind, ErrorKind::NotFound);
//!
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash)?);
//! ```

pub mod errors;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorKind};
pub use password::{DEFAULT_COST, hash_password, hash_password_with_cost, verify_password};
