mod common;

use common::Campus;
use registrar::modules::exams::service::ExamService;
use registrar::modules::grades::service::GradeService;
use registrar::modules::registrations::service::RegistrationService;
use registrar::registrar_core::ErrorKind;
use registrar::registrar_db::Store;
use registrar::registrar_models::LetterGrade;
use registrar::registrar_models::exams::UpdateExamDto;
use registrar::registrar_models::grades::{CreateGradeDto, UpdateGradeDto};

fn grade_dto(campus: &Campus, exam_id: i32, marks_scored: f64) -> CreateGradeDto {
    CreateGradeDto {
        student_id: campus.student.id,
        exam_id,
        evaluated_by_id: campus.professor.id,
        marks_scored,
        comments: None,
    }
}

async fn approved_campus() -> Campus {
    let campus = Campus::new().await;
    let registration =
        RegistrationService::add_course(&campus.store, campus.student.id, campus.course.id)
            .await
            .unwrap();
    RegistrationService::approve(&campus.store, registration.id, None)
        .await
        .unwrap();
    campus
}

#[tokio::test]
async fn test_add_grade_computes_percentage_and_letter() {
    let campus = approved_campus().await;
    let exam = campus.add_exam(50).await;

    let grade = GradeService::add_grade(&campus.store, grade_dto(&campus, exam.id, 45.0))
        .await
        .unwrap();

    assert_eq!(grade.percentage, 90.0);
    assert_eq!(grade.letter_grade, LetterGrade::APlus);
    assert_eq!(grade.evaluated_by_id, campus.professor.id);
}

#[tokio::test]
async fn test_full_marks_is_outstanding() {
    let campus = approved_campus().await;
    let exam = campus.add_exam(100).await;

    let grade = GradeService::add_grade(&campus.store, grade_dto(&campus, exam.id, 100.0))
        .await
        .unwrap();

    assert_eq!(grade.letter_grade, LetterGrade::O);
}

#[tokio::test]
async fn test_marks_above_total_are_rejected() {
    let campus = approved_campus().await;
    let exam = campus.add_exam(50).await;

    let err = GradeService::add_grade(&campus.store, grade_dto(&campus, exam.id, 50.5))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::BusinessRuleViolation));

    let err = GradeService::add_grade(&campus.store, grade_dto(&campus, exam.id, -1.0))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::BusinessRuleViolation));
}

#[tokio::test]
async fn test_exam_without_total_mark_is_invalid() {
    let campus = approved_campus().await;
    let exam = campus.add_exam(0).await;

    let err = GradeService::add_grade(&campus.store, grade_dto(&campus, exam.id, 0.0))
        .await
        .unwrap_err();

    assert!(err.is(ErrorKind::InvalidArgument));
}

#[tokio::test]
async fn test_student_must_be_approved_for_the_course() {
    let campus = Campus::new().await;
    let exam = campus.add_exam(100).await;

    let err = GradeService::add_grade(&campus.store, grade_dto(&campus, exam.id, 70.0))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::BusinessRuleViolation));
    assert_eq!(err.to_string(), "Student has not opted for this course");

    RegistrationService::add_course(&campus.store, campus.student.id, campus.course.id)
        .await
        .unwrap();
    let err = GradeService::add_grade(&campus.store, grade_dto(&campus, exam.id, 70.0))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::BusinessRuleViolation));
}

#[tokio::test]
async fn test_one_grade_per_student_and_exam() {
    let campus = approved_campus().await;
    let exam = campus.add_exam(100).await;
    GradeService::add_grade(&campus.store, grade_dto(&campus, exam.id, 70.0))
        .await
        .unwrap();

    let err = GradeService::add_grade(&campus.store, grade_dto(&campus, exam.id, 80.0))
        .await
        .unwrap_err();

    assert!(err.is(ErrorKind::AlreadyExists));
}

#[tokio::test]
async fn test_unknown_references_are_not_found() {
    let campus = approved_campus().await;
    let exam = campus.add_exam(100).await;

    let err = GradeService::add_grade(&campus.store, grade_dto(&campus, 999, 70.0))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));

    let dto = CreateGradeDto {
        evaluated_by_id: 999,
        ..grade_dto(&campus, exam.id, 70.0)
    };
    let err = GradeService::add_grade(&campus.store, dto).await.unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}

#[tokio::test]
async fn test_update_recomputes_letter() {
    let campus = approved_campus().await;
    let exam = campus.add_exam(100).await;
    let grade = GradeService::add_grade(&campus.store, grade_dto(&campus, exam.id, 35.0))
        .await
        .unwrap();
    assert_eq!(grade.letter_grade, LetterGrade::F);

    let updated = GradeService::update_grade(
        &campus.store,
        grade.id,
        UpdateGradeDto {
            marks_scored: Some(62.0),
            comments: Some("Re-evaluated".to_string()),
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.letter_grade, LetterGrade::BPlus);
    assert_eq!(updated.percentage, 62.0);
    assert_eq!(updated.comments.as_deref(), Some("Re-evaluated"));
}

#[tokio::test]
async fn test_grades_by_student_and_exam() {
    let campus = approved_campus().await;
    let exam = campus.add_exam(100).await;

    let err = GradeService::get_grades_by_student(&campus.store, campus.student.id)
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));

    GradeService::add_grade(&campus.store, grade_dto(&campus, exam.id, 88.0))
        .await
        .unwrap();

    let by_student = GradeService::get_grades_by_student(&campus.store, campus.student.id)
        .await
        .unwrap();
    let by_exam = GradeService::get_grades_by_exam(&campus.store, exam.id)
        .await
        .unwrap();

    assert_eq!(by_student, by_exam);
    assert_eq!(by_student[0].letter_grade, LetterGrade::APlus);
}

#[tokio::test]
async fn test_exam_total_cannot_drop_below_recorded_marks() {
    let campus = approved_campus().await;
    let exam = campus.add_exam(50).await;
    let grade = GradeService::add_grade(&campus.store, grade_dto(&campus, exam.id, 45.0))
        .await
        .unwrap();

    for total_mark in [10, 0] {
        let dto = UpdateExamDto {
            total_mark: Some(total_mark),
            ..Default::default()
        };
        let err = ExamService::update_exam(&campus.store, exam.id, dto)
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::BusinessRuleViolation));
    }

    assert_eq!(campus.store.exams().get_by_id(exam.id).await.unwrap().total_mark, 50);
    let unchanged = GradeService::get_grade(&campus.store, grade.id).await.unwrap();
    assert_eq!(unchanged.letter_grade, LetterGrade::APlus);
}

#[tokio::test]
async fn test_exam_total_change_regrades_recorded_marks() {
    let campus = approved_campus().await;
    let exam = campus.add_exam(50).await;
    let grade = GradeService::add_grade(&campus.store, grade_dto(&campus, exam.id, 45.0))
        .await
        .unwrap();

    let dto = UpdateExamDto {
        total_mark: Some(60),
        ..Default::default()
    };
    let updated = ExamService::update_exam(&campus.store, exam.id, dto)
        .await
        .unwrap();
    assert_eq!(updated.total_mark, 60);

    let regraded = GradeService::get_grade(&campus.store, grade.id).await.unwrap();
    assert_eq!(regraded.marks_scored, 45.0);
    assert_eq!(regraded.percentage, 75.0);
    assert_eq!(regraded.letter_grade, LetterGrade::A);
}
