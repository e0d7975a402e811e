use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use registrar_core::AppError;
use registrar_models::registrations::{EnrollDto, ReviewParams};
use registrar_models::{ApprovalStatus, CourseRegistration};

use crate::middleware::auth::{AuthUser, RequireAdmin, RequireFaculty};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::registrations::service::RegistrationService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a student for a course
///
/// Takes a seat and charges the course fee to the student's e-wallet. The
/// registration starts out pending.
#[utoipa::path(
    post,
    path = "/api/registrations/register",
    request_body = EnrollDto,
    responses(
        (status = 201, description = "Registration created", body = CourseRegistration),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - students may only register themselves", body = ErrorResponse),
        (status = 404, description = "Student or course not found", body = ErrorResponse),
        (status = 409, description = "Already registered for this course", body = ErrorResponse),
        (status = 422, description = "No vacancy, insufficient balance or inactive student", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Registrations"
)]
#[instrument(skip(state))]
pub async fn register_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<EnrollDto>,
) -> Result<(StatusCode, Json<CourseRegistration>), AppError> {
    auth_user.ensure_student_or_faculty(dto.student_id)?;
    let registration =
        RegistrationService::add_course(state.store.as_ref(), dto.student_id, dto.course_id)
            .await?;
    Ok((StatusCode::CREATED, Json(registration)))
}

#[utoipa::path(
    get,
    path = "/api/registrations",
    responses(
        (status = 200, description = "All registrations", body = Vec<CourseRegistration>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - faculty only", body = ErrorResponse),
        (status = 404, description = "No registrations exist", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Registrations"
)]
#[instrument(skip(state))]
pub async fn get_all_registrations(
    State(state): State<AppState>,
    _faculty: RequireFaculty,
) -> Result<Json<Vec<CourseRegistration>>, AppError> {
    let registrations = RegistrationService::get_all_registrations(state.store.as_ref()).await?;
    Ok(Json(registrations))
}

#[utoipa::path(
    get,
    path = "/api/registrations/{id}",
    params(
        ("id" = i32, Path, description = "Registration ID")
    ),
    responses(
        (status = 200, description = "Registration", body = CourseRegistration),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - another student's registration", body = ErrorResponse),
        (status = 404, description = "Registration not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Registrations"
)]
#[instrument(skip(state))]
pub async fn get_registration(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<CourseRegistration>, AppError> {
    let registration = RegistrationService::get_registration(state.store.as_ref(), id).await?;
    auth_user.ensure_student_or_faculty(registration.student_id)?;
    Ok(Json(registration))
}

#[utoipa::path(
    delete,
    path = "/api/registrations/{id}",
    params(
        ("id" = i32, Path, description = "Registration ID")
    ),
    responses(
        (status = 200, description = "Deleted registration (no refund)", body = CourseRegistration),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Registration not found", body = ErrorResponse),
        (status = 409, description = "Registration is still pending", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Registrations"
)]
#[instrument(skip(state))]
pub async fn delete_registration(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Json<CourseRegistration>, AppError> {
    let registration = RegistrationService::delete(state.store.as_ref(), id).await?;
    Ok(Json(registration))
}

#[utoipa::path(
    put,
    path = "/api/registrations/{id}/approve",
    params(
        ("id" = i32, Path, description = "Registration ID"),
        ReviewParams
    ),
    responses(
        (status = 200, description = "Registration approved", body = CourseRegistration),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - faculty only", body = ErrorResponse),
        (status = 404, description = "Registration not found", body = ErrorResponse),
        (status = 409, description = "Registration already approved or rejected", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Registrations"
)]
#[instrument(skip(state))]
pub async fn approve_registration(
    State(state): State<AppState>,
    _faculty: RequireFaculty,
    Path(id): Path<i32>,
    Query(params): Query<ReviewParams>,
) -> Result<Json<CourseRegistration>, AppError> {
    let registration =
        RegistrationService::approve(state.store.as_ref(), id, params.comments).await?;
    Ok(Json(registration))
}

#[utoipa::path(
    put,
    path = "/api/registrations/{id}/reject",
    params(
        ("id" = i32, Path, description = "Registration ID"),
        ReviewParams
    ),
    responses(
        (status = 200, description = "Registration rejected, fee refunded", body = CourseRegistration),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - faculty only", body = ErrorResponse),
        (status = 404, description = "Registration not found", body = ErrorResponse),
        (status = 409, description = "Registration already approved or rejected", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Registrations"
)]
#[instrument(skip(state))]
pub async fn reject_registration(
    State(state): State<AppState>,
    _faculty: RequireFaculty,
    Path(id): Path<i32>,
    Query(params): Query<ReviewParams>,
) -> Result<Json<CourseRegistration>, AppError> {
    let registration =
        RegistrationService::reject(state.store.as_ref(), id, params.comments).await?;
    Ok(Json(registration))
}

#[utoipa::path(
    get,
    path = "/api/registrations/student/{id}",
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "The student's registrations", body = Vec<CourseRegistration>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - another student's registrations", body = ErrorResponse),
        (status = 404, description = "No registrations found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Registrations"
)]
#[instrument(skip(state))]
pub async fn get_registrations_by_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Vec<CourseRegistration>>, AppError> {
    auth_user.ensure_student_or_faculty(id)?;
    let registrations = RegistrationService::get_by_student(state.store.as_ref(), id).await?;
    Ok(Json(registrations))
}

#[utoipa::path(
    get,
    path = "/api/registrations/student/{id}/status/{status}",
    params(
        ("id" = i32, Path, description = "Student ID"),
        ("status" = String, Path, description = "pending, approved or rejected")
    ),
    responses(
        (status = 200, description = "The student's registrations in that status", body = Vec<CourseRegistration>),
        (status = 400, description = "Unknown status", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - another student's registrations", body = ErrorResponse),
        (status = 404, description = "No registrations found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Registrations"
)]
#[instrument(skip(state))]
pub async fn get_registrations_by_student_and_status(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((id, status)): Path<(i32, String)>,
) -> Result<Json<Vec<CourseRegistration>>, AppError> {
    auth_user.ensure_student_or_faculty(id)?;
    let status: ApprovalStatus = status.parse()?;
    let registrations =
        RegistrationService::get_by_student_and_status(state.store.as_ref(), id, status).await?;
    Ok(Json(registrations))
}

#[utoipa::path(
    get,
    path = "/api/registrations/course/{id}",
    params(
        ("id" = i32, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Registrations for the course", body = Vec<CourseRegistration>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - faculty only", body = ErrorResponse),
        (status = 404, description = "No registrations found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Registrations"
)]
#[instrument(skip(state))]
pub async fn get_registrations_by_course(
    State(state): State<AppState>,
    _faculty: RequireFaculty,
    Path(id): Path<i32>,
) -> Result<Json<Vec<CourseRegistration>>, AppError> {
    let registrations = RegistrationService::get_by_course(state.store.as_ref(), id).await?;
    Ok(Json(registrations))
}

#[utoipa::path(
    get,
    path = "/api/registrations/course/{id}/status/{status}",
    params(
        ("id" = i32, Path, description = "Course ID"),
        ("status" = String, Path, description = "pending, approved or rejected")
    ),
    responses(
        (status = 200, description = "Registrations for the course in that status", body = Vec<CourseRegistration>),
        (status = 400, description = "Unknown status", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - faculty only", body = ErrorResponse),
        (status = 404, description = "No registrations found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Registrations"
)]
#[instrument(skip(state))]
pub async fn get_registrations_by_course_and_status(
    State(state): State<AppState>,
    _faculty: RequireFaculty,
    Path((id, status)): Path<(i32, String)>,
) -> Result<Json<Vec<CourseRegistration>>, AppError> {
    let status: ApprovalStatus = status.parse()?;
    let registrations =
        RegistrationService::get_by_course_and_status(state.store.as_ref(), id, status).await?;
    Ok(Json(registrations))
}
