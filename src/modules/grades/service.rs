use anyhow::anyhow;
use tracing::{info, instrument};

use registrar_core::AppError;
use registrar_db::Store;
use registrar_models::grades::{CreateGradeDto, UpdateGradeDto, percentage};
use registrar_models::{ApprovalStatus, Exam, Grade, LetterGrade};

use crate::metrics::track_grade_recorded;
use crate::modules::non_empty;

/// Percentage and letter for `marks_scored` out of the exam's total mark.
pub(crate) fn evaluate(marks_scored: f64, exam: &Exam) -> Result<(f64, LetterGrade), AppError> {
    if exam.total_mark <= 0 {
        return Err(AppError::invalid_argument(anyhow!(
            "Invalid grade: the exam has no total mark"
        )));
    }
    if !marks_scored.is_finite() || marks_scored < 0.0 || marks_scored > f64::from(exam.total_mark)
    {
        return Err(AppError::business_rule(anyhow!(
            "Invalid marks scored: must be between 0 and {}",
            exam.total_mark
        )));
    }

    let percentage = percentage(marks_scored, exam.total_mark)
        .ok_or_else(|| AppError::invalid_argument(anyhow!("Invalid grade")))?;

    Ok((percentage, LetterGrade::from_percentage(percentage)))
}

pub struct GradeService;

impl GradeService {
    /// Grades a student on an exam of a course they are approved for.
    #[instrument(skip(store))]
    pub async fn add_grade(store: &dyn Store, dto: CreateGradeDto) -> Result<Grade, AppError> {
        store.students().get_by_id(dto.student_id).await?;
        let exam = store.exams().get_by_id(dto.exam_id).await?;
        store.faculty().get_by_id(dto.evaluated_by_id).await?;

        let (percentage, letter_grade) = evaluate(dto.marks_scored, &exam)?;

        let opted = store.registrations().get_all().await?.iter().any(|r| {
            r.student_id == dto.student_id
                && r.course_id == exam.course_id
                && r.approval_status == ApprovalStatus::Approved
        });
        if !opted {
            return Err(AppError::business_rule(anyhow!(
                "Student has not opted for this course"
            )));
        }

        let graded = store
            .grades()
            .get_all()
            .await?
            .iter()
            .any(|g| g.student_id == dto.student_id && g.exam_id == dto.exam_id);
        if graded {
            return Err(AppError::already_exists(anyhow!(
                "Student has already been graded for this exam"
            )));
        }

        let grade = store
            .grades()
            .add(Grade {
                id: 0,
                student_id: dto.student_id,
                exam_id: dto.exam_id,
                evaluated_by_id: dto.evaluated_by_id,
                marks_scored: dto.marks_scored,
                percentage,
                letter_grade,
                comments: dto.comments,
            })
            .await?;

        track_grade_recorded(letter_grade.as_str());
        info!(grade_id = grade.id, %letter_grade, "Grade recorded");
        Ok(grade)
    }

    /// Patches marks and/or comments; the letter follows the marks.
    #[instrument(skip(store))]
    pub async fn update_grade(
        store: &dyn Store,
        id: i32,
        dto: UpdateGradeDto,
    ) -> Result<Grade, AppError> {
        let mut grade = store.grades().get_by_id(id).await?;

        if let Some(marks_scored) = dto.marks_scored {
            let exam = store.exams().get_by_id(grade.exam_id).await?;
            let (percentage, letter_grade) = evaluate(marks_scored, &exam)?;
            grade.marks_scored = marks_scored;
            grade.percentage = percentage;
            grade.letter_grade = letter_grade;
        }
        if let Some(comments) = dto.comments {
            grade.comments = Some(comments);
        }

        store.grades().update(grade).await
    }

    #[instrument(skip(store))]
    pub async fn delete_grade(store: &dyn Store, id: i32) -> Result<Grade, AppError> {
        store.grades().delete(id).await
    }

    #[instrument(skip(store))]
    pub async fn get_grade(store: &dyn Store, id: i32) -> Result<Grade, AppError> {
        store.grades().get_by_id(id).await
    }

    #[instrument(skip(store))]
    pub async fn get_all_grades(store: &dyn Store) -> Result<Vec<Grade>, AppError> {
        non_empty(store.grades().get_all().await?, "No grade records exist")
    }

    #[instrument(skip(store))]
    pub async fn get_grades_by_student(
        store: &dyn Store,
        student_id: i32,
    ) -> Result<Vec<Grade>, AppError> {
        store.students().get_by_id(student_id).await?;

        let grades = store
            .grades()
            .get_all()
            .await?
            .into_iter()
            .filter(|g| g.student_id == student_id)
            .collect();

        non_empty(grades, "No grade records exist for this student")
    }

    #[instrument(skip(store))]
    pub async fn get_grades_by_exam(store: &dyn Store, exam_id: i32) -> Result<Vec<Grade>, AppError> {
        store.exams().get_by_id(exam_id).await?;

        let grades = store
            .grades()
            .get_all()
            .await?
            .into_iter()
            .filter(|g| g.exam_id == exam_id)
            .collect();

        non_empty(grades, "No grade records exist for this exam")
    }
}
