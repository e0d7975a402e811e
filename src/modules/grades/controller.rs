use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use registrar_core::AppError;
use registrar_models::Grade;
use registrar_models::grades::{CreateGradeDto, UpdateGradeDto};

use crate::middleware::auth::{AuthUser, RequireFaculty};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::grades::service::GradeService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Record a student's grade for an exam
#[utoipa::path(
    post,
    path = "/api/grades",
    request_body = CreateGradeDto,
    responses(
        (status = 201, description = "Grade recorded", body = Grade),
        (status = 400, description = "Exam has no total mark", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - faculty only", body = ErrorResponse),
        (status = 404, description = "Student, exam or evaluator not found", body = ErrorResponse),
        (status = 409, description = "Student already graded for this exam", body = ErrorResponse),
        (status = 422, description = "Invalid marks or student not approved for the course", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Grades"
)]
#[instrument(skip(state))]
pub async fn add_grade(
    State(state): State<AppState>,
    _faculty: RequireFaculty,
    ValidatedJson(dto): ValidatedJson<CreateGradeDto>,
) -> Result<(StatusCode, Json<Grade>), AppError> {
    let grade = GradeService::add_grade(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(grade)))
}

#[utoipa::path(
    get,
    path = "/api/grades",
    responses(
        (status = 200, description = "All grade records", body = Vec<Grade>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - faculty only", body = ErrorResponse),
        (status = 404, description = "No grade records exist", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Grades"
)]
#[instrument(skip(state))]
pub async fn get_all_grades(
    State(state): State<AppState>,
    _faculty: RequireFaculty,
) -> Result<Json<Vec<Grade>>, AppError> {
    let grades = GradeService::get_all_grades(state.store.as_ref()).await?;
    Ok(Json(grades))
}

#[utoipa::path(
    get,
    path = "/api/grades/{id}",
    params(
        ("id" = i32, Path, description = "Grade ID")
    ),
    responses(
        (status = 200, description = "Grade record", body = Grade),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - another student's grade", body = ErrorResponse),
        (status = 404, description = "Grade record not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Grades"
)]
#[instrument(skip(state))]
pub async fn get_grade(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Grade>, AppError> {
    let grade = GradeService::get_grade(state.store.as_ref(), id).await?;
    auth_user.ensure_student_or_faculty(grade.student_id)?;
    Ok(Json(grade))
}

#[utoipa::path(
    get,
    path = "/api/grades/student/{id}",
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "The student's grades", body = Vec<Grade>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - another student's grades", body = ErrorResponse),
        (status = 404, description = "Student not found or not graded", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Grades"
)]
#[instrument(skip(state))]
pub async fn get_grades_by_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Grade>>, AppError> {
    auth_user.ensure_student_or_faculty(id)?;
    let grades = GradeService::get_grades_by_student(state.store.as_ref(), id).await?;
    Ok(Json(grades))
}

#[utoipa::path(
    get,
    path = "/api/grades/exam/{id}",
    params(
        ("id" = i32, Path, description = "Exam ID")
    ),
    responses(
        (status = 200, description = "Grades for the exam", body = Vec<Grade>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - faculty only", body = ErrorResponse),
        (status = 404, description = "Exam not found or not graded", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Grades"
)]
#[instrument(skip(state))]
pub async fn get_grades_by_exam(
    State(state): State<AppState>,
    _faculty: RequireFaculty,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Grade>>, AppError> {
    let grades = GradeService::get_grades_by_exam(state.store.as_ref(), id).await?;
    Ok(Json(grades))
}

#[utoipa::path(
    put,
    path = "/api/grades/{id}",
    params(
        ("id" = i32, Path, description = "Grade ID")
    ),
    request_body = UpdateGradeDto,
    responses(
        (status = 200, description = "Grade updated", body = Grade),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - faculty only", body = ErrorResponse),
        (status = 404, description = "Grade record not found", body = ErrorResponse),
        (status = 422, description = "Invalid marks", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Grades"
)]
#[instrument(skip(state))]
pub async fn update_grade(
    State(state): State<AppState>,
    _faculty: RequireFaculty,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateGradeDto>,
) -> Result<Json<Grade>, AppError> {
    let grade = GradeService::update_grade(state.store.as_ref(), id, dto).await?;
    Ok(Json(grade))
}

#[utoipa::path(
    delete,
    path = "/api/grades/{id}",
    params(
        ("id" = i32, Path, description = "Grade ID")
    ),
    responses(
        (status = 200, description = "Deleted grade record", body = Grade),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - faculty only", body = ErrorResponse),
        (status = 404, description = "Grade record not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Grades"
)]
#[instrument(skip(state))]
pub async fn delete_grade(
    State(state): State<AppState>,
    _faculty: RequireFaculty,
    Path(id): Path<i32>,
) -> Result<Json<Grade>, AppError> {
    let grade = GradeService::delete_grade(state.store.as_ref(), id).await?;
    Ok(Json(grade))
}
