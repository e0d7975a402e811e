//! Course entity and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use registrar_core::serde::deserialize_optional_trimmed;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct Course {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Faculty member teaching the course.
    pub faculty_id: i32,
    /// Fee charged to the student's wallet on registration.
    pub fees: i64,
    /// Seats left.
    pub vacancy: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(length(min = 1, max = 150))]
    #[schema(example = "Operating Systems")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub faculty_id: i32,
    pub fees: i64,
    pub vacancy: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(length(min = 1, max = 150))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub faculty_id: Option<i32>,
    pub fees: Option<i64>,
    pub vacancy: Option<i32>,
}
