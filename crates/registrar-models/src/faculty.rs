//! Faculty entity and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use registrar_core::serde::deserialize_optional_trimmed;

use crate::accounts::{AccountStatus, FacultyRole, age_on, today};

/// A faculty member as stored.
///
/// `department_id` is empty for administrators that belong to no department
/// and for self-registered faculty awaiting placement.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Faculty {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub dob: NaiveDate,
    pub gender: String,
    pub mobile: String,
    pub address: String,
    pub role: FacultyRole,
    pub status: AccountStatus,
    pub department_id: Option<i32>,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl Faculty {
    pub fn age(&self) -> i32 {
        age_on(self.dob, today())
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FacultyResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub dob: NaiveDate,
    pub age: i32,
    pub gender: String,
    pub mobile: String,
    pub address: String,
    pub role: FacultyRole,
    pub status: AccountStatus,
    pub department_id: Option<i32>,
}

impl From<Faculty> for FacultyResponse {
    fn from(faculty: Faculty) -> Self {
        Self {
            age: faculty.age(),
            id: faculty.id,
            name: faculty.name,
            email: faculty.email,
            dob: faculty.dob,
            gender: faculty.gender,
            mobile: faculty.mobile,
            address: faculty.address,
            role: faculty.role,
            status: faculty.status,
            department_id: faculty.department_id,
        }
    }
}

/// Partial update of a faculty member. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateFacultyDto {
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
    pub role: Option<FacultyRole>,
    pub department_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_hides_password_and_adds_age() {
        let faculty = Faculty {
            id: 3,
            name: "Grace".to_string(),
            email: "grace@uni.edu".to_string(),
            dob: NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
            gender: "F".to_string(),
            mobile: "555".to_string(),
            address: "Campus".to_string(),
            role: FacultyRole::Professor,
            status: AccountStatus::Active,
            department_id: Some(1),
            password_hash: "$2b$hash".to_string(),
        };

        let json = serde_json::to_value(&faculty).unwrap();
        assert!(json.get("password_hash").is_none());

        let response = FacultyResponse::from(faculty);
        assert!(response.age >= 50);
    }

    #[test]
    fn test_update_dto_treats_blank_name_as_absent() {
        let dto: UpdateFacultyDto = serde_json::from_str(r#"{"name": "  "}"#).unwrap();
        assert!(dto.name.is_none());
        assert!(dto.validate().is_ok());
    }
}
