use axum::{Router, routing::post};

use super::controller::{login_user, register_faculty, register_student};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login_user))
        .route("/register/student", post(register_student))
        .route("/register/faculty", post(register_faculty))
}
