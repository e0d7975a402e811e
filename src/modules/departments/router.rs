use axum::{
    Router,
    routing::{get, post, put},
};

use crate::modules::departments::controller::{
    change_head, create_department, delete_department, get_department, get_departments,
    rename_department,
};
use crate::state::AppState;

pub fn init_departments_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_department).get(get_departments))
        .route(
            "/{id}",
            get(get_department)
                .put(rename_department)
                .delete(delete_department),
        )
        .route("/{id}/head", put(change_head))
}
