use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::attendance::controller::{
    delete_attendance, get_all_attendance, get_attendance, get_attendance_by_course,
    get_attendance_by_student, get_student_attendance_percentage, mark_attendance,
    update_attendance,
};
use crate::state::AppState;

pub fn init_attendance_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_attendance))
        .route("/mark-attendance", post(mark_attendance))
        .route(
            "/{id}",
            get(get_attendance)
                .put(update_attendance)
                .delete(delete_attendance),
        )
        .route("/student/{id}", get(get_attendance_by_student))
        .route(
            "/student/{id}/percentage",
            get(get_student_attendance_percentage),
        )
        .route("/course/{id}", get(get_attendance_by_course))
}
