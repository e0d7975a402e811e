use axum::{
    Router,
    routing::{get, post, put},
};

use crate::modules::registrations::controller::{
    approve_registration, delete_registration, get_all_registrations, get_registration,
    get_registrations_by_course, get_registrations_by_course_and_status,
    get_registrations_by_student, get_registrations_by_student_and_status, register_course,
    reject_registration,
};
use crate::state::AppState;

pub fn init_registrations_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_registrations))
        .route("/register", post(register_course))
        .route(
            "/{id}",
            get(get_registration).delete(delete_registration),
        )
        .route("/{id}/approve", put(approve_registration))
        .route("/{id}/reject", put(reject_registration))
        .route("/student/{id}", get(get_registrations_by_student))
        .route(
            "/student/{id}/status/{status}",
            get(get_registrations_by_student_and_status),
        )
        .route("/course/{id}", get(get_registrations_by_course))
        .route(
            "/course/{id}/status/{status}",
            get(get_registrations_by_course_and_status),
        )
}
