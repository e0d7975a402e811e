use std::collections::BTreeMap;

use anyhow::anyhow;
use chrono::{NaiveDate, Utc};
use tracing::instrument;

use registrar_core::AppError;
use registrar_db::Store;
use registrar_models::attendance::{
    CourseAttendancePercentage, MarkAttendanceDto, UpdateAttendanceDto,
};
use registrar_models::{AttendanceStatus, StudentAttendance};

use crate::metrics::track_attendance_marked;
use crate::modules::non_empty;

/// Present records over all records, per course, in course id order.
pub fn attendance_percentages(records: &[StudentAttendance]) -> Vec<CourseAttendancePercentage> {
    let mut per_course: BTreeMap<i32, (u32, u32)> = BTreeMap::new();

    for record in records {
        let (present, total) = per_course.entry(record.course_id).or_default();
        if record.status == AttendanceStatus::Present {
            *present += 1;
        }
        *total += 1;
    }

    per_course
        .into_iter()
        .map(|(course_id, (present, total))| CourseAttendancePercentage {
            course_id,
            present,
            total,
            percentage: f64::from(present) / f64::from(total) * 100.0,
        })
        .collect()
}

pub struct AttendanceService;

impl AttendanceService {
    #[instrument(skip(store))]
    pub async fn mark_attendance(
        store: &dyn Store,
        dto: MarkAttendanceDto,
    ) -> Result<StudentAttendance, AppError> {
        Self::mark_attendance_on(store, dto, Utc::now().date_naive()).await
    }

    /// [`Self::mark_attendance`] with an explicit current date.
    pub async fn mark_attendance_on(
        store: &dyn Store,
        dto: MarkAttendanceDto,
        today: NaiveDate,
    ) -> Result<StudentAttendance, AppError> {
        let status: AttendanceStatus = dto.status.parse()?;

        store.students().get_by_id(dto.student_roll_no).await?;
        store.courses().get_by_id(dto.course_id).await?;

        if dto.date > today {
            return Err(AppError::business_rule(anyhow!(
                "Invalid attendance date: {} is in the future",
                dto.date
            )));
        }

        let marked = store.attendance().get_all().await?.iter().any(|a| {
            a.student_roll_no == dto.student_roll_no
                && a.course_id == dto.course_id
                && a.date == dto.date
        });
        if marked {
            return Err(AppError::already_exists(anyhow!(
                "Attendance already marked for this student, course and date"
            )));
        }

        let record = store
            .attendance()
            .add(StudentAttendance {
                id: 0,
                student_roll_no: dto.student_roll_no,
                course_id: dto.course_id,
                date: dto.date,
                status,
            })
            .await?;

        track_attendance_marked(status.as_str());
        Ok(record)
    }

    #[instrument(skip(store))]
    pub async fn update_attendance(
        store: &dyn Store,
        id: i32,
        dto: UpdateAttendanceDto,
    ) -> Result<StudentAttendance, AppError> {
        let status: AttendanceStatus = dto.status.parse()?;
        let mut record = store.attendance().get_by_id(id).await?;

        if record.status == status {
            return Err(AppError::invalid_state(anyhow!(
                "Attendance is already marked {status}"
            )));
        }

        record.status = status;
        store.attendance().update(record).await
    }

    #[instrument(skip(store))]
    pub async fn delete_attendance(
        store: &dyn Store,
        id: i32,
    ) -> Result<StudentAttendance, AppError> {
        store.attendance().delete(id).await
    }

    #[instrument(skip(store))]
    pub async fn get_attendance(store: &dyn Store, id: i32) -> Result<StudentAttendance, AppError> {
        store.attendance().get_by_id(id).await
    }

    #[instrument(skip(store))]
    pub async fn get_all_attendance(store: &dyn Store) -> Result<Vec<StudentAttendance>, AppError> {
        non_empty(
            store.attendance().get_all().await?,
            "No attendance records exist",
        )
    }

    #[instrument(skip(store))]
    pub async fn get_attendance_by_student(
        store: &dyn Store,
        student_id: i32,
    ) -> Result<Vec<StudentAttendance>, AppError> {
        store.students().get_by_id(student_id).await?;

        let records = store
            .attendance()
            .get_all()
            .await?
            .into_iter()
            .filter(|a| a.student_roll_no == student_id)
            .collect();

        non_empty(records, "No attendance records exist for this student")
    }

    /// Records for a course, optionally restricted to one date.
    #[instrument(skip(store))]
    pub async fn get_attendance_by_course(
        store: &dyn Store,
        course_id: i32,
        date: Option<NaiveDate>,
    ) -> Result<Vec<StudentAttendance>, AppError> {
        store.courses().get_by_id(course_id).await?;

        let records = store
            .attendance()
            .get_all()
            .await?
            .into_iter()
            .filter(|a| a.course_id == course_id && date.is_none_or(|d| a.date == d))
            .collect();

        non_empty(records, "No attendance records exist for this course")
    }

    #[instrument(skip(store))]
    pub async fn get_student_attendance_percentage(
        store: &dyn Store,
        student_id: i32,
    ) -> Result<Vec<CourseAttendancePercentage>, AppError> {
        let records = Self::get_attendance_by_student(store, student_id).await?;
        Ok(attendance_percentages(&records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i32, course_id: i32, status: AttendanceStatus) -> StudentAttendance {
        StudentAttendance {
            id,
            student_roll_no: 1,
            course_id,
            date: NaiveDate::from_ymd_opt(2024, 1, id as u32).unwrap(),
            status,
        }
    }

    #[test]
    fn test_one_present_of_two_is_fifty_percent() {
        let records = [
            record(1, 7, AttendanceStatus::Present),
            record(2, 7, AttendanceStatus::Absent),
        ];

        let result = attendance_percentages(&records);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].present, 1);
        assert_eq!(result[0].total, 2);
        assert_eq!(result[0].percentage, 50.0);
    }

    #[test]
    fn test_percentages_are_per_course() {
        let records = [
            record(1, 2, AttendanceStatus::Present),
            record(2, 1, AttendanceStatus::Od),
            record(3, 2, AttendanceStatus::Present),
        ];

        let result = attendance_percentages(&records);
        assert_eq!(result[0].course_id, 1);
        assert_eq!(result[0].percentage, 0.0);
        assert_eq!(result[1].course_id, 2);
        assert_eq!(result[1].percentage, 100.0);
    }
}
