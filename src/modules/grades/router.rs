use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::grades::controller::{
    add_grade, delete_grade, get_all_grades, get_grade, get_grades_by_exam,
    get_grades_by_student, update_grade,
};
use crate::state::AppState;

pub fn init_grades_router() -> Router<AppState> {
    Router::new()
        .route("/", post(add_grade).get(get_all_grades))
        .route(
            "/{id}",
            get(get_grade).put(update_grade).delete(delete_grade),
        )
        .route("/student/{id}", get(get_grades_by_student))
        .route("/exam/{id}", get(get_grades_by_exam))
}
