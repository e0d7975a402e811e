use axum::{
    Router,
    routing::{get, post, put},
};

use crate::modules::students::controller::{
    change_password, create_student, delete_student, get_student, get_students,
    get_students_by_department, top_up_wallet, update_student,
};
use crate::state::AppState;

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_student).get(get_students))
        .route(
            "/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .route("/department/{id}", get(get_students_by_department))
        .route("/{id}/wallet", post(top_up_wallet))
        .route("/{id}/password", put(change_password))
}
