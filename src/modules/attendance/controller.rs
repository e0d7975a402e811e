use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use registrar_core::AppError;
use registrar_models::StudentAttendance;
use registrar_models::attendance::{
    AttendanceByCourseParams, CourseAttendancePercentage, MarkAttendanceDto, UpdateAttendanceDto,
};

use crate::middleware::auth::{AuthUser, RequireFaculty};
use crate::modules::attendance::service::AttendanceService;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Mark a student's attendance for a course on a date
#[utoipa::path(
    post,
    path = "/api/attendance/mark-attendance",
    request_body = MarkAttendanceDto,
    responses(
        (status = 201, description = "Attendance marked", body = StudentAttendance),
        (status = 400, description = "Unknown attendance status", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - faculty only", body = ErrorResponse),
        (status = 404, description = "Student or course not found", body = ErrorResponse),
        (status = 409, description = "Attendance already marked", body = ErrorResponse),
        (status = 422, description = "Date is in the future", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn mark_attendance(
    State(state): State<AppState>,
    _faculty: RequireFaculty,
    ValidatedJson(dto): ValidatedJson<MarkAttendanceDto>,
) -> Result<(StatusCode, Json<StudentAttendance>), AppError> {
    let record = AttendanceService::mark_attendance(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    get,
    path = "/api/attendance",
    responses(
        (status = 200, description = "All attendance records", body = Vec<StudentAttendance>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - faculty only", body = ErrorResponse),
        (status = 404, description = "No attendance records exist", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_all_attendance(
    State(state): State<AppState>,
    _faculty: RequireFaculty,
) -> Result<Json<Vec<StudentAttendance>>, AppError> {
    let records = AttendanceService::get_all_attendance(state.store.as_ref()).await?;
    Ok(Json(records))
}

#[utoipa::path(
    get,
    path = "/api/attendance/{id}",
    params(
        ("id" = i32, Path, description = "Attendance record ID")
    ),
    responses(
        (status = 200, description = "Attendance record", body = StudentAttendance),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - another student's record", body = ErrorResponse),
        (status = 404, description = "Attendance record not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_attendance(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<StudentAttendance>, AppError> {
    let record = AttendanceService::get_attendance(state.store.as_ref(), id).await?;
    auth_user.ensure_student_or_faculty(record.student_roll_no)?;
    Ok(Json(record))
}

#[utoipa::path(
    get,
    path = "/api/attendance/student/{id}",
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "The student's attendance", body = Vec<StudentAttendance>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - another student's records", body = ErrorResponse),
        (status = 404, description = "Student not found or no records", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_attendance_by_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Vec<StudentAttendance>>, AppError> {
    auth_user.ensure_student_or_faculty(id)?;
    let records = AttendanceService::get_attendance_by_student(state.store.as_ref(), id).await?;
    Ok(Json(records))
}

/// Attendance percentage per course for a student
#[utoipa::path(
    get,
    path = "/api/attendance/student/{id}/percentage",
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Percentage per course", body = Vec<CourseAttendancePercentage>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - another student's records", body = ErrorResponse),
        (status = 404, description = "Student not found or no records", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_student_attendance_percentage(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Vec<CourseAttendancePercentage>>, AppError> {
    auth_user.ensure_student_or_faculty(id)?;
    let percentages =
        AttendanceService::get_student_attendance_percentage(state.store.as_ref(), id).await?;
    Ok(Json(percentages))
}

#[utoipa::path(
    get,
    path = "/api/attendance/course/{id}",
    params(
        ("id" = i32, Path, description = "Course ID"),
        AttendanceByCourseParams
    ),
    responses(
        (status = 200, description = "Attendance for the course", body = Vec<StudentAttendance>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - faculty only", body = ErrorResponse),
        (status = 404, description = "Course not found or no records", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_attendance_by_course(
    State(state): State<AppState>,
    _faculty: RequireFaculty,
    Path(id): Path<i32>,
    Query(params): Query<AttendanceByCourseParams>,
) -> Result<Json<Vec<StudentAttendance>>, AppError> {
    let records =
        AttendanceService::get_attendance_by_course(state.store.as_ref(), id, params.date).await?;
    Ok(Json(records))
}

#[utoipa::path(
    put,
    path = "/api/attendance/{id}",
    params(
        ("id" = i32, Path, description = "Attendance record ID")
    ),
    request_body = UpdateAttendanceDto,
    responses(
        (status = 200, description = "Attendance updated", body = StudentAttendance),
        (status = 400, description = "Unknown attendance status", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - faculty only", body = ErrorResponse),
        (status = 404, description = "Attendance record not found", body = ErrorResponse),
        (status = 409, description = "Status unchanged", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn update_attendance(
    State(state): State<AppState>,
    _faculty: RequireFaculty,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateAttendanceDto>,
) -> Result<Json<StudentAttendance>, AppError> {
    let record = AttendanceService::update_attendance(state.store.as_ref(), id, dto).await?;
    Ok(Json(record))
}

#[utoipa::path(
    delete,
    path = "/api/attendance/{id}",
    params(
        ("id" = i32, Path, description = "Attendance record ID")
    ),
    responses(
        (status = 200, description = "Deleted attendance record", body = StudentAttendance),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - faculty only", body = ErrorResponse),
        (status = 404, description = "Attendance record not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn delete_attendance(
    State(state): State<AppState>,
    _faculty: RequireFaculty,
    Path(id): Path<i32>,
) -> Result<Json<StudentAttendance>, AppError> {
    let record = AttendanceService::delete_attendance(state.store.as_ref(), id).await?;
    Ok(Json(record))
}
