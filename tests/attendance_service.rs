mod common;

use chrono::NaiveDate;
use common::{Campus, date};
use registrar::modules::attendance::service::AttendanceService;
use registrar::registrar_core::ErrorKind;
use registrar::registrar_db::Store;
use registrar::registrar_models::attendance::{MarkAttendanceDto, UpdateAttendanceDto};
use registrar::registrar_models::{AttendanceStatus, Course};

fn today() -> NaiveDate {
    date(2025, 3, 10)
}

fn mark(campus: &Campus, course_id: i32, day: NaiveDate, status: &str) -> MarkAttendanceDto {
    MarkAttendanceDto {
        student_roll_no: campus.student.id,
        course_id,
        date: day,
        status: status.to_string(),
    }
}

#[tokio::test]
async fn test_mark_attendance_parses_status() {
    let campus = Campus::new().await;

    let record = AttendanceService::mark_attendance_on(
        &campus.store,
        mark(&campus, campus.course.id, date(2025, 3, 3), "od"),
        today(),
    )
    .await
    .unwrap();

    assert_eq!(record.status, AttendanceStatus::Od);
    assert_eq!(record.student_roll_no, campus.student.id);
}

#[tokio::test]
async fn test_unknown_status_is_invalid_argument() {
    let campus = Campus::new().await;

    let err = AttendanceService::mark_attendance_on(
        &campus.store,
        mark(&campus, campus.course.id, date(2025, 3, 3), "late"),
        today(),
    )
    .await
    .unwrap_err();

    assert!(err.is(ErrorKind::InvalidArgument));
}

#[tokio::test]
async fn test_future_date_is_refused() {
    let campus = Campus::new().await;

    let err = AttendanceService::mark_attendance_on(
        &campus.store,
        mark(&campus, campus.course.id, date(2025, 3, 11), "Present"),
        today(),
    )
    .await
    .unwrap_err();
    assert!(err.is(ErrorKind::BusinessRuleViolation));

    AttendanceService::mark_attendance_on(
        &campus.store,
        mark(&campus, campus.course.id, today(), "Present"),
        today(),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_attendance_is_marked_once_per_day() {
    let campus = Campus::new().await;
    let day = date(2025, 3, 4);
    AttendanceService::mark_attendance_on(
        &campus.store,
        mark(&campus, campus.course.id, day, "Present"),
        today(),
    )
    .await
    .unwrap();

    let err = AttendanceService::mark_attendance_on(
        &campus.store,
        mark(&campus, campus.course.id, day, "Absent"),
        today(),
    )
    .await
    .unwrap_err();

    assert!(err.is(ErrorKind::AlreadyExists));
}

#[tokio::test]
async fn test_unknown_student_or_course_is_not_found() {
    let campus = Campus::new().await;

    let err = AttendanceService::mark_attendance_on(
        &campus.store,
        mark(&campus, 999, date(2025, 3, 4), "Present"),
        today(),
    )
    .await
    .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));

    let dto = MarkAttendanceDto {
        student_roll_no: 999,
        ..mark(&campus, campus.course.id, date(2025, 3, 4), "Present")
    };
    let err = AttendanceService::mark_attendance_on(&campus.store, dto, today())
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}

#[tokio::test]
async fn test_update_to_same_status_is_invalid_state() {
    let campus = Campus::new().await;
    let record = AttendanceService::mark_attendance_on(
        &campus.store,
        mark(&campus, campus.course.id, date(2025, 3, 4), "Absent"),
        today(),
    )
    .await
    .unwrap();

    let err = AttendanceService::update_attendance(
        &campus.store,
        record.id,
        UpdateAttendanceDto {
            status: "absent".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(err.is(ErrorKind::InvalidState));

    let updated = AttendanceService::update_attendance(
        &campus.store,
        record.id,
        UpdateAttendanceDto {
            status: "Present".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.status, AttendanceStatus::Present);
}

#[tokio::test]
async fn test_course_attendance_filters_by_date() {
    let campus = Campus::new().await;
    for (day, status) in [(3, "Present"), (4, "Absent"), (5, "Present")] {
        AttendanceService::mark_attendance_on(
            &campus.store,
            mark(&campus, campus.course.id, date(2025, 3, day), status),
            today(),
        )
        .await
        .unwrap();
    }

    let all = AttendanceService::get_attendance_by_course(&campus.store, campus.course.id, None)
        .await
        .unwrap();
    assert_eq!(all.len(), 3);

    let one_day = AttendanceService::get_attendance_by_course(
        &campus.store,
        campus.course.id,
        Some(date(2025, 3, 4)),
    )
    .await
    .unwrap();
    assert_eq!(one_day.len(), 1);
    assert_eq!(one_day[0].status, AttendanceStatus::Absent);

    let err = AttendanceService::get_attendance_by_course(
        &campus.store,
        campus.course.id,
        Some(date(2025, 3, 9)),
    )
    .await
    .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}

#[tokio::test]
async fn test_percentage_per_course() {
    let campus = Campus::new().await;
    let second = campus
        .store
        .courses()
        .add(Course {
            id: 0,
            name: "Compilers".to_string(),
            description: String::new(),
            faculty_id: campus.professor.id,
            fees: 0,
            vacancy: 10,
        })
        .await
        .unwrap();

    let marks = [
        (campus.course.id, 3, "Present"),
        (campus.course.id, 4, "Present"),
        (campus.course.id, 5, "Present"),
        (campus.course.id, 6, "Absent"),
        (second.id, 3, "Present"),
        (second.id, 4, "OD"),
    ];
    for (course_id, day, status) in marks {
        AttendanceService::mark_attendance_on(
            &campus.store,
            mark(&campus, course_id, date(2025, 3, day), status),
            today(),
        )
        .await
        .unwrap();
    }

    let percentages =
        AttendanceService::get_student_attendance_percentage(&campus.store, campus.student.id)
            .await
            .unwrap();

    assert_eq!(percentages.len(), 2);
    assert_eq!(percentages[0].course_id, campus.course.id);
    assert_eq!(percentages[0].present, 3);
    assert_eq!(percentages[0].total, 4);
    assert_eq!(percentages[0].percentage, 75.0);
    assert_eq!(percentages[1].course_id, second.id);
    assert_eq!(percentages[1].percentage, 50.0);
}

#[tokio::test]
async fn test_percentage_without_records_is_not_found() {
    let campus = Campus::new().await;

    let err =
        AttendanceService::get_student_attendance_percentage(&campus.store, campus.student.id)
            .await
            .unwrap_err();

    assert!(err.is(ErrorKind::NotFound));
}
