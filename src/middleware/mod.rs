//! Request extractors and middleware for authentication and authorization.
//!
//! - [`auth`]: The [`auth::AuthUser`] extractor and role-gated extractors
//!   such as [`auth::RequireAdmin`]
//! - [`role`]: `route_layer` middleware restricting whole routers by role
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `AuthUser` verifies the JWT and extracts the claims
//! 3. Role middleware or a `Require*` extractor checks the role
//! 4. The handler runs, applying any ownership checks itself

pub mod auth;
pub mod role;
