//! Student entity and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use registrar_core::serde::deserialize_optional_trimmed;

use crate::accounts::{AccountStatus, age_on, today};

/// A student as stored. `e_wallet` is the prepaid balance used to pay
/// course fees, in the smallest currency unit.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub dob: NaiveDate,
    pub gender: String,
    pub mobile: String,
    pub address: String,
    pub status: AccountStatus,
    pub department_id: i32,
    pub e_wallet: i64,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl Student {
    pub fn age(&self) -> i32 {
        age_on(self.dob, today())
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StudentResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub dob: NaiveDate,
    pub age: i32,
    pub gender: String,
    pub mobile: String,
    pub address: String,
    pub status: AccountStatus,
    pub department_id: i32,
    pub e_wallet: i64,
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        Self {
            age: student.age(),
            id: student.id,
            name: student.name,
            email: student.email,
            dob: student.dob,
            gender: student.gender,
            mobile: student.mobile,
            address: student.address,
            status: student.status,
            department_id: student.department_id,
            e_wallet: student.e_wallet,
        }
    }
}

/// DTO for creating a student from the administration side.
///
/// Students created this way start active; self-registration goes through
/// [`crate::auth::RegisterStudentDto`] instead.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub dob: NaiveDate,
    #[validate(length(min = 1, max = 20))]
    pub gender: String,
    #[validate(length(min = 1, max = 20))]
    pub mobile: String,
    #[validate(length(min = 1, max = 255))]
    pub address: String,
    pub department_id: i32,
    /// Opening wallet balance (defaults to 0).
    #[validate(range(min = 0))]
    pub e_wallet: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub dob: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(length(max = 20))]
    pub mobile: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub address: Option<String>,
    pub department_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TopUpWalletDto {
    #[schema(example = 500)]
    pub amount: i64,
}
