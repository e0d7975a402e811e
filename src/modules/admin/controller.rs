use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use registrar_core::AppError;
use registrar_models::admin::PendingActivations;
use registrar_models::faculty::FacultyResponse;
use registrar_models::students::StudentResponse;

use crate::modules::admin::service::AdminService;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

/// Accounts awaiting activation
#[utoipa::path(
    get,
    path = "/api/admin/pending",
    responses(
        (status = 200, description = "Inactive faculty and students", body = PendingActivations),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn get_pending_activations(
    State(state): State<AppState>,
) -> Result<Json<PendingActivations>, AppError> {
    let pending = AdminService::pending_activations(state.store.as_ref()).await?;
    Ok(Json(pending))
}

#[utoipa::path(
    post,
    path = "/api/admin/students/{id}/activate",
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student activated", body = StudentResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 409, description = "Student already active", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn activate_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<StudentResponse>, AppError> {
    let student = AdminService::activate_student(state.store.as_ref(), id).await?;
    Ok(Json(student))
}

#[utoipa::path(
    post,
    path = "/api/admin/students/{id}/deactivate",
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student deactivated", body = StudentResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 409, description = "Student already inactive", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn deactivate_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<StudentResponse>, AppError> {
    let student = AdminService::deactivate_student(state.store.as_ref(), id).await?;
    Ok(Json(student))
}

#[utoipa::path(
    post,
    path = "/api/admin/faculty/{id}/activate",
    params(
        ("id" = i32, Path, description = "Faculty ID")
    ),
    responses(
        (status = 200, description = "Faculty member activated", body = FacultyResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Faculty member not found", body = ErrorResponse),
        (status = 409, description = "Faculty member already active", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn activate_faculty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<FacultyResponse>, AppError> {
    let faculty = AdminService::activate_faculty(state.store.as_ref(), id).await?;
    Ok(Json(faculty))
}

#[utoipa::path(
    post,
    path = "/api/admin/faculty/{id}/deactivate",
    params(
        ("id" = i32, Path, description = "Faculty ID")
    ),
    responses(
        (status = 200, description = "Faculty member deactivated", body = FacultyResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Faculty member not found", body = ErrorResponse),
        (status = 409, description = "Faculty member already inactive", body = ErrorResponse),
        (status = 422, description = "Admin accounts cannot be deactivated", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn deactivate_faculty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<FacultyResponse>, AppError> {
    let faculty = AdminService::deactivate_faculty(state.store.as_ref(), id).await?;
    Ok(Json(faculty))
}
