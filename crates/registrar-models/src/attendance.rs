//! Attendance records and per-course percentages.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use registrar_core::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "attendance_status", rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    /// On duty: excused, but not counted as present.
    #[serde(rename = "OD")]
    Od,
}

impl AttendanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
            Self::Od => "OD",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            "od" => Ok(Self::Od),
            other => Err(AppError::invalid_argument(anyhow::anyhow!(
                "Invalid attendance status '{other}', expected Present, Absent or OD"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct StudentAttendance {
    pub id: i32,
    pub student_roll_no: i32,
    pub course_id: i32,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Status arrives as a string so that unknown values map to a 400 with a
/// readable message instead of a JSON decoding failure.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct MarkAttendanceDto {
    pub student_roll_no: i32,
    pub course_id: i32,
    pub date: NaiveDate,
    #[schema(example = "Present")]
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateAttendanceDto {
    #[schema(example = "Absent")]
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct AttendanceByCourseParams {
    /// Restrict the listing to one day.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CourseAttendancePercentage {
    pub course_id: i32,
    pub present: u32,
    pub total: u32,
    pub percentage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use registrar_core::ErrorKind;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("present".parse::<AttendanceStatus>().unwrap(), AttendanceStatus::Present);
        assert_eq!("ABSENT".parse::<AttendanceStatus>().unwrap(), AttendanceStatus::Absent);
        assert_eq!("Od".parse::<AttendanceStatus>().unwrap(), AttendanceStatus::Od);
    }

    #[test]
    fn test_unknown_status_is_invalid_argument() {
        let err = "late".parse::<AttendanceStatus>().unwrap_err();
        assert!(err.is(ErrorKind::InvalidArgument));
        assert!(err.to_string().contains("late"));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for status in [AttendanceStatus::Present, AttendanceStatus::Absent, AttendanceStatus::Od] {
            assert_eq!(status.to_string().parse::<AttendanceStatus>().unwrap(), status);
        }
    }
}
