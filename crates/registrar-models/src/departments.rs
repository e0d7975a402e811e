//! Department entity and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Name of the pseudo-department that holds the bootstrap administrators.
/// Students can never be placed in it.
pub const ADMIN_DEPARTMENT: &str = "Admin";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct Department {
    pub id: i32,
    pub name: String,
    /// Faculty member heading the department.
    pub head_id: i32,
}

impl Department {
    pub fn is_admin_department(&self) -> bool {
        self.name.eq_ignore_ascii_case(ADMIN_DEPARTMENT)
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateDepartmentDto {
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Computer Science")]
    pub name: String,
    pub head_id: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RenameDepartmentDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ChangeHeadDto {
    pub head_id: i32,
}
