use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::exams::controller::{
    create_exam, delete_exam, get_exam, get_exam_by_course, get_exams, update_exam,
};
use crate::state::AppState;

pub fn init_exams_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_exam).get(get_exams))
        .route("/{id}", get(get_exam).put(update_exam).delete(delete_exam))
        .route("/course/{id}", get(get_exam_by_course))
}
