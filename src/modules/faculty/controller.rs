use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use registrar_core::AppError;
use registrar_models::faculty::{FacultyResponse, UpdateFacultyDto};
use registrar_models::{ChangePasswordDto, MessageResponse};

use crate::middleware::auth::{AuthUser, RequireAdmin, RequireFaculty};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::faculty::service::FacultyService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/faculty",
    responses(
        (status = 200, description = "All faculty members", body = Vec<FacultyResponse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - faculty only", body = ErrorResponse),
        (status = 404, description = "No faculty exist", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Faculty"
)]
#[instrument(skip(state))]
pub async fn get_all_faculty(
    State(state): State<AppState>,
    _faculty: RequireFaculty,
) -> Result<Json<Vec<FacultyResponse>>, AppError> {
    let faculty = FacultyService::get_all_faculty(state.store.as_ref()).await?;
    Ok(Json(faculty))
}

#[utoipa::path(
    get,
    path = "/api/faculty/{id}",
    params(
        ("id" = i32, Path, description = "Faculty ID")
    ),
    responses(
        (status = 200, description = "Faculty member details", body = FacultyResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Faculty member not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Faculty"
)]
#[instrument(skip(state))]
pub async fn get_faculty(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<FacultyResponse>, AppError> {
    let faculty = FacultyService::get_faculty(state.store.as_ref(), id).await?;
    Ok(Json(faculty))
}

#[utoipa::path(
    get,
    path = "/api/faculty/department/{id}",
    params(
        ("id" = i32, Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "Faculty of the department", body = Vec<FacultyResponse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Department not found or empty", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Faculty"
)]
#[instrument(skip(state))]
pub async fn get_faculty_by_department(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Vec<FacultyResponse>>, AppError> {
    let faculty = FacultyService::get_faculty_by_department(state.store.as_ref(), id).await?;
    Ok(Json(faculty))
}

#[utoipa::path(
    put,
    path = "/api/faculty/{id}",
    params(
        ("id" = i32, Path, description = "Faculty ID")
    ),
    request_body = UpdateFacultyDto,
    responses(
        (status = 200, description = "Faculty member updated", body = FacultyResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Faculty member or department not found", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 422, description = "Validation error or head of department conflict", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Faculty"
)]
#[instrument(skip(state, dto))]
pub async fn update_faculty(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateFacultyDto>,
) -> Result<Json<FacultyResponse>, AppError> {
    let faculty = FacultyService::update_faculty(state.store.as_ref(), id, dto).await?;
    Ok(Json(faculty))
}

#[utoipa::path(
    delete,
    path = "/api/faculty/{id}",
    params(
        ("id" = i32, Path, description = "Faculty ID")
    ),
    responses(
        (status = 200, description = "Deleted faculty member", body = FacultyResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Faculty member not found", body = ErrorResponse),
        (status = 409, description = "Faculty member is a head or still teaches courses", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Faculty"
)]
#[instrument(skip(state))]
pub async fn delete_faculty(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Json<FacultyResponse>, AppError> {
    let faculty = FacultyService::delete_faculty(state.store.as_ref(), id).await?;
    Ok(Json(faculty))
}

/// Change a faculty member's password
#[utoipa::path(
    put,
    path = "/api/faculty/{id}/password",
    params(
        ("id" = i32, Path, description = "Faculty ID")
    ),
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 401, description = "Unauthorized or wrong current password", body = ErrorResponse),
        (status = 403, description = "Forbidden - not the account owner or an admin", body = ErrorResponse),
        (status = 404, description = "Faculty member not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Faculty"
)]
#[instrument(skip(state, dto))]
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<ChangePasswordDto>,
) -> Result<Json<MessageResponse>, AppError> {
    auth_user.ensure_self_or_admin(id)?;
    let response = FacultyService::change_password(state.store.as_ref(), id, dto).await?;
    Ok(Json(response))
}
