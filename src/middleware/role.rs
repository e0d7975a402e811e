//! Route-level role checks.
//!
//! These run as `route_layer`s so a whole router can be restricted at once:
//!
//! ```rust,ignore
//! init_departments_router()
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
//! ```

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use registrar_auth::Role;
use registrar_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Lets the request through when its token carries one of `allowed_roles`.
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: &[Role],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;

    if !auth_user.has_any_role(allowed_roles) {
        return Err(AppError::forbidden(format!(
            "Access denied. Role {} may not access this resource",
            auth_user.role()
        )));
    }

    Ok(next.run(Request::from_parts(parts, body)).await)
}

pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, &[Role::Admin]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}
