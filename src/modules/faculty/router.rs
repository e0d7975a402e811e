use axum::{
    Router,
    routing::{get, put},
};

use crate::modules::faculty::controller::{
    change_password, delete_faculty, get_all_faculty, get_faculty, get_faculty_by_department,
    update_faculty,
};
use crate::state::AppState;

pub fn init_faculty_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_faculty))
        .route(
            "/{id}",
            get(get_faculty).put(update_faculty).delete(delete_faculty),
        )
        .route("/department/{id}", get(get_faculty_by_department))
        .route("/{id}/password", put(change_password))
}
