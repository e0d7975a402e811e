use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;
use utoipa::ToSchema;

use registrar_core::AppError;
use registrar_models::auth::{LoginRequest, LoginResponse, RegisterFacultyDto, RegisterStudentDto};
use registrar_models::faculty::FacultyResponse;
use registrar_models::students::StudentResponse;

use super::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Body of every error response.
#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine readable error category, e.g. `not_found`.
    pub kind: String,
}

/// Login and receive a JWT access token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Bad request - malformed body", body = ErrorResponse),
        (status = 401, description = "Invalid credentials or account not activated", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login(state.store.as_ref(), dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Register a student account (inactive until an admin activates it)
#[utoipa::path(
    post,
    path = "/api/auth/register/student",
    request_body = RegisterStudentDto,
    responses(
        (status = 201, description = "Student registered", body = StudentResponse),
        (status = 400, description = "Bad request - malformed body", body = ErrorResponse),
        (status = 404, description = "Department not found", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 422, description = "Validation error or Admin department", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterStudentDto>,
) -> Result<(StatusCode, Json<StudentResponse>), AppError> {
    let student = AuthService::register_student(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// Register a faculty account (inactive until an admin activates it)
#[utoipa::path(
    post,
    path = "/api/auth/register/faculty",
    request_body = RegisterFacultyDto,
    responses(
        (status = 201, description = "Faculty member registered", body = FacultyResponse),
        (status = 400, description = "Bad request - malformed body", body = ErrorResponse),
        (status = 404, description = "Department not found", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_faculty(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterFacultyDto>,
) -> Result<(StatusCode, Json<FacultyResponse>), AppError> {
    let faculty = AuthService::register_faculty(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(faculty)))
}
