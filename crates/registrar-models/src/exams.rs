//! Exam entity and DTOs.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Upper bound for an exam's total mark.
pub const MAX_TOTAL_MARK: i32 = 100;

/// The single exam held for a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct Exam {
    pub id: i32,
    pub course_id: i32,
    pub total_mark: i32,
    pub exam_date: NaiveDate,
    /// Free-form label such as "final" or "midterm".
    pub exam_type: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateExamDto {
    pub course_id: i32,
    #[schema(example = 100)]
    pub total_mark: i32,
    pub exam_date: NaiveDate,
    #[validate(length(min = 1, max = 50))]
    pub exam_type: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateExamDto {
    pub total_mark: Option<i32>,
    pub exam_date: Option<NaiveDate>,
    #[validate(length(min = 1, max = 50))]
    pub exam_type: Option<String>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}
