use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use registrar_auth::{Claims, Role, verify_token};
use registrar_core::AppError;

use crate::state::AppState;

/// Extractor that validates the bearer token and exposes its claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Id of the faculty member or student the token was issued to.
    pub fn user_id(&self) -> Result<i32, AppError> {
        self.0.user_id()
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.0.role)
    }

    /// Students may only act on their own records; faculty may act on any.
    pub fn ensure_student_or_faculty(&self, student_id: i32) -> Result<(), AppError> {
        if self.0.role.is_faculty() || self.user_id()? == student_id {
            return Ok(());
        }

        Err(AppError::forbidden(
            "Access denied. Students may only access their own records",
        ))
    }

    /// Faculty members may act on their own account; admins on any.
    pub fn ensure_self_or_admin(&self, faculty_id: i32) -> Result<(), AppError> {
        if self.0.role.is_admin() || (!self.0.is_student() && self.user_id()? == faculty_id) {
            return Ok(());
        }

        Err(AppError::forbidden(
            "Access denied. Only the account owner or an admin may do this",
        ))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

/// Declares an extractor that only admits tokens whose role passes `$check`.
#[macro_export]
macro_rules! require_role {
    ($name:ident, $check:path, $label:literal) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = registrar_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user =
                    $crate::middleware::auth::AuthUser::from_request_parts(parts, state).await?;

                if !$check(auth_user.role()) {
                    return Err(registrar_core::AppError::forbidden(format!(
                        "Access denied. {} role required",
                        $label
                    )));
                }

                Ok($name(auth_user))
            }
        }
    };
}

require_role!(RequireAdmin, Role::is_admin, "Admin");
require_role!(RequireFaculty, Role::is_faculty, "Faculty");
