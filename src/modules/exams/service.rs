use anyhow::anyhow;
use tracing::{info, instrument};

use registrar_core::AppError;
use registrar_db::Store;
use registrar_models::exams::{CreateExamDto, MAX_TOTAL_MARK, UpdateExamDto};
use registrar_models::{Exam, Grade};

use crate::modules::grades::service::evaluate;
use crate::modules::non_empty;

fn ensure_schedulable(exam: &Exam) -> Result<(), AppError> {
    if !(0..=MAX_TOTAL_MARK).contains(&exam.total_mark) {
        return Err(AppError::invalid_argument(anyhow!(
            "Total mark must be between 0 and {MAX_TOTAL_MARK}"
        )));
    }
    if exam.end_time <= exam.start_time {
        return Err(AppError::invalid_argument(anyhow!(
            "Exam end time must be after its start time"
        )));
    }
    Ok(())
}

pub struct ExamService;

impl ExamService {
    /// A course has at most one exam.
    #[instrument(skip(store))]
    pub async fn create_exam(store: &dyn Store, dto: CreateExamDto) -> Result<Exam, AppError> {
        let exam = Exam {
            id: 0,
            course_id: dto.course_id,
            total_mark: dto.total_mark,
            exam_date: dto.exam_date,
            exam_type: dto.exam_type.trim().to_string(),
            start_time: dto.start_time,
            end_time: dto.end_time,
        };
        ensure_schedulable(&exam)?;

        store.courses().get_by_id(dto.course_id).await?;
        let scheduled = store
            .exams()
            .get_all()
            .await?
            .iter()
            .any(|e| e.course_id == dto.course_id);
        if scheduled {
            return Err(AppError::already_exists(anyhow!(
                "An exam already exists for this course"
            )));
        }

        store.exams().add(exam).await
    }

    #[instrument(skip(store))]
    pub async fn get_exams(store: &dyn Store) -> Result<Vec<Exam>, AppError> {
        non_empty(store.exams().get_all().await?, "No exams exist")
    }

    #[instrument(skip(store))]
    pub async fn get_exam(store: &dyn Store, id: i32) -> Result<Exam, AppError> {
        store.exams().get_by_id(id).await
    }

    #[instrument(skip(store))]
    pub async fn get_exam_by_course(store: &dyn Store, course_id: i32) -> Result<Exam, AppError> {
        store.courses().get_by_id(course_id).await?;

        store
            .exams()
            .get_all()
            .await?
            .into_iter()
            .find(|e| e.course_id == course_id)
            .ok_or_else(|| AppError::not_found(anyhow!("No exam exists for this course")))
    }

    #[instrument(skip(store))]
    pub async fn update_exam(
        store: &dyn Store,
        id: i32,
        dto: UpdateExamDto,
    ) -> Result<Exam, AppError> {
        let mut exam = store.exams().get_by_id(id).await?;
        let previous_total = exam.total_mark;

        if let Some(total_mark) = dto.total_mark {
            exam.total_mark = total_mark;
        }
        if let Some(exam_date) = dto.exam_date {
            exam.exam_date = exam_date;
        }
        if let Some(exam_type) = dto.exam_type {
            exam.exam_type = exam_type.trim().to_string();
        }
        if let Some(start_time) = dto.start_time {
            exam.start_time = start_time;
        }
        if let Some(end_time) = dto.end_time {
            exam.end_time = end_time;
        }
        ensure_schedulable(&exam)?;

        if exam.total_mark == previous_total {
            return store.exams().update(exam).await;
        }

        let regraded = Self::regrade(store, &exam).await?;
        let exam = store.exams().update(exam).await?;
        for grade in regraded {
            store.grades().update(grade).await?;
        }

        Ok(exam)
    }

    /// Recomputes every recorded grade of `exam` against its new total mark.
    /// Fails without writing when a recorded grade no longer fits.
    async fn regrade(store: &dyn Store, exam: &Exam) -> Result<Vec<Grade>, AppError> {
        let grades: Vec<Grade> = store
            .grades()
            .get_all()
            .await?
            .into_iter()
            .filter(|g| g.exam_id == exam.id)
            .collect();

        if !grades.is_empty() && exam.total_mark == 0 {
            return Err(AppError::business_rule(anyhow!(
                "Total mark cannot be zero once grades are recorded"
            )));
        }

        let mut regraded = Vec::with_capacity(grades.len());
        for mut grade in grades {
            let (percentage, letter_grade) = evaluate(grade.marks_scored, exam).map_err(|_| {
                AppError::business_rule(anyhow!(
                    "Total mark {} is below marks already recorded for this exam",
                    exam.total_mark
                ))
            })?;
            grade.percentage = percentage;
            grade.letter_grade = letter_grade;
            regraded.push(grade);
        }

        if !regraded.is_empty() {
            info!(exam_id = exam.id, grades = regraded.len(), "Grades recomputed for new total mark");
        }
        Ok(regraded)
    }

    #[instrument(skip(store))]
    pub async fn delete_exam(store: &dyn Store, id: i32) -> Result<Exam, AppError> {
        store.exams().delete(id).await
    }
}
