use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use registrar_core::AppError;
use registrar_models::Department;
use registrar_models::departments::{ChangeHeadDto, CreateDepartmentDto, RenameDepartmentDto};

use crate::middleware::auth::{AuthUser, RequireAdmin};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::departments::service::DepartmentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create a department headed by an existing faculty member
#[utoipa::path(
    post,
    path = "/api/departments",
    request_body = CreateDepartmentDto,
    responses(
        (status = 201, description = "Department created", body = Department),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Head not found", body = ErrorResponse),
        (status = 409, description = "Department name already exists", body = ErrorResponse),
        (status = 422, description = "Head is an admin or already a head", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Departments"
)]
#[instrument(skip(state))]
pub async fn create_department(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateDepartmentDto>,
) -> Result<(StatusCode, Json<Department>), AppError> {
    let department = DepartmentService::create_department(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(department)))
}

#[utoipa::path(
    get,
    path = "/api/departments",
    responses(
        (status = 200, description = "All departments", body = Vec<Department>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "No departments exist", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Departments"
)]
#[instrument(skip(state))]
pub async fn get_departments(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<Department>>, AppError> {
    let departments = DepartmentService::get_departments(state.store.as_ref()).await?;
    Ok(Json(departments))
}

#[utoipa::path(
    get,
    path = "/api/departments/{id}",
    params(
        ("id" = i32, Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "Department details", body = Department),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Department not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Departments"
)]
#[instrument(skip(state))]
pub async fn get_department(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Department>, AppError> {
    let department = DepartmentService::get_department(state.store.as_ref(), id).await?;
    Ok(Json(department))
}

#[utoipa::path(
    put,
    path = "/api/departments/{id}",
    params(
        ("id" = i32, Path, description = "Department ID")
    ),
    request_body = RenameDepartmentDto,
    responses(
        (status = 200, description = "Department renamed", body = Department),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Department not found", body = ErrorResponse),
        (status = 409, description = "Department name already exists", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Departments"
)]
#[instrument(skip(state))]
pub async fn rename_department(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<RenameDepartmentDto>,
) -> Result<Json<Department>, AppError> {
    let department = DepartmentService::rename_department(state.store.as_ref(), id, dto).await?;
    Ok(Json(department))
}

/// Replace the head of a department
#[utoipa::path(
    put,
    path = "/api/departments/{id}/head",
    params(
        ("id" = i32, Path, description = "Department ID")
    ),
    request_body = ChangeHeadDto,
    responses(
        (status = 200, description = "Head changed", body = Department),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Department or faculty member not found", body = ErrorResponse),
        (status = 422, description = "Faculty member cannot head this department", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Departments"
)]
#[instrument(skip(state))]
pub async fn change_head(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<ChangeHeadDto>,
) -> Result<Json<Department>, AppError> {
    let department = DepartmentService::change_head(state.store.as_ref(), id, dto).await?;
    Ok(Json(department))
}

#[utoipa::path(
    delete,
    path = "/api/departments/{id}",
    params(
        ("id" = i32, Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "Deleted department", body = Department),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Department not found", body = ErrorResponse),
        (status = 409, description = "Department still has members", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Departments"
)]
#[instrument(skip(state))]
pub async fn delete_department(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Json<Department>, AppError> {
    let department = DepartmentService::delete_department(state.store.as_ref(), id).await?;
    Ok(Json(department))
}
