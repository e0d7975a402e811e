use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use registrar_core::AppError;
use registrar_models::Exam;
use registrar_models::exams::{CreateExamDto, UpdateExamDto};

use crate::middleware::auth::{AuthUser, RequireAdmin};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::exams::service::ExamService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/exams",
    request_body = CreateExamDto,
    responses(
        (status = 201, description = "Exam scheduled", body = Exam),
        (status = 400, description = "Total mark out of range or end before start", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 409, description = "Course already has an exam", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Exams"
)]
#[instrument(skip(state))]
pub async fn create_exam(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateExamDto>,
) -> Result<(StatusCode, Json<Exam>), AppError> {
    let exam = ExamService::create_exam(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(exam)))
}

#[utoipa::path(
    get,
    path = "/api/exams",
    responses(
        (status = 200, description = "All exams", body = Vec<Exam>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "No exams exist", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Exams"
)]
#[instrument(skip(state))]
pub async fn get_exams(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<Exam>>, AppError> {
    let exams = ExamService::get_exams(state.store.as_ref()).await?;
    Ok(Json(exams))
}

#[utoipa::path(
    get,
    path = "/api/exams/{id}",
    params(
        ("id" = i32, Path, description = "Exam ID")
    ),
    responses(
        (status = 200, description = "Exam details", body = Exam),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Exam not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Exams"
)]
#[instrument(skip(state))]
pub async fn get_exam(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Exam>, AppError> {
    let exam = ExamService::get_exam(state.store.as_ref(), id).await?;
    Ok(Json(exam))
}

#[utoipa::path(
    get,
    path = "/api/exams/course/{id}",
    params(
        ("id" = i32, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "The course's exam", body = Exam),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Course not found or has no exam", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Exams"
)]
#[instrument(skip(state))]
pub async fn get_exam_by_course(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Exam>, AppError> {
    let exam = ExamService::get_exam_by_course(state.store.as_ref(), id).await?;
    Ok(Json(exam))
}

#[utoipa::path(
    put,
    path = "/api/exams/{id}",
    params(
        ("id" = i32, Path, description = "Exam ID")
    ),
    request_body = UpdateExamDto,
    responses(
        (status = 200, description = "Exam updated", body = Exam),
        (status = 400, description = "Total mark out of range or end before start", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Exam not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Exams"
)]
#[instrument(skip(state))]
pub async fn update_exam(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateExamDto>,
) -> Result<Json<Exam>, AppError> {
    let exam = ExamService::update_exam(state.store.as_ref(), id, dto).await?;
    Ok(Json(exam))
}

#[utoipa::path(
    delete,
    path = "/api/exams/{id}",
    params(
        ("id" = i32, Path, description = "Exam ID")
    ),
    responses(
        (status = 200, description = "Deleted exam", body = Exam),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Exam not found", body = ErrorResponse),
        (status = 409, description = "Exam still has grades", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Exams"
)]
#[instrument(skip(state))]
pub async fn delete_exam(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Json<Exam>, AppError> {
    let exam = ExamService::delete_exam(state.store.as_ref(), id).await?;
    Ok(Json(exam))
}
