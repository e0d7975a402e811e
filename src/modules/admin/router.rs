use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::admin::controller::{
    activate_faculty, activate_student, deactivate_faculty, deactivate_student,
    get_pending_activations,
};
use crate::state::AppState;

/// Admin-only routes; the caller guards this router with `require_admin`.
pub fn init_admin_router() -> Router<AppState> {
    Router::new()
        .route("/pending", get(get_pending_activations))
        .route("/students/{id}/activate", post(activate_student))
        .route("/students/{id}/deactivate", post(deactivate_student))
        .route("/faculty/{id}/activate", post(activate_faculty))
        .route("/faculty/{id}/deactivate", post(deactivate_faculty))
}
