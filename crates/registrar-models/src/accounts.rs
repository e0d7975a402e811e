//! Types shared by faculty and student accounts.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use registrar_auth::Role;

/// Role of a faculty member.
///
/// `HeadOfDepartment` is only assigned and removed through the department
/// workflows; there is exactly one per department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "faculty_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FacultyRole {
    Admin,
    HeadOfDepartment,
    Professor,
    AssociateProfessor,
    AssistantProfessor,
}

impl FacultyRole {
    pub fn is_head(self) -> bool {
        matches!(self, Self::HeadOfDepartment)
    }
}

impl From<FacultyRole> for Role {
    fn from(role: FacultyRole) -> Self {
        match role {
            FacultyRole::Admin => Role::Admin,
            FacultyRole::HeadOfDepartment => Role::HeadOfDepartment,
            FacultyRole::Professor => Role::Professor,
            FacultyRole::AssociateProfessor => Role::AssociateProfessor,
            FacultyRole::AssistantProfessor => Role::AssistantProfessor,
        }
    }
}

impl fmt::Display for FacultyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Role::from(*self).fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "account_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Inactive,
}

/// Whole years between `dob` and `today`.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    years.max(0)
}

pub(crate) fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Request to change the caller's password.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordDto {
    #[validate(length(min = 1))]
    #[serde(alias = "old_password")]
    pub current_password: String,
    #[validate(length(min = 8))]
    #[schema(example = "newPassword123")]
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let dob = date(2000, 6, 15);
        assert_eq!(age_on(dob, date(2024, 6, 14)), 23);
        assert_eq!(age_on(dob, date(2024, 6, 15)), 24);
        assert_eq!(age_on(dob, date(2024, 12, 1)), 24);
    }

    #[test]
    fn test_age_never_negative() {
        assert_eq!(age_on(date(2030, 1, 1), date(2024, 1, 1)), 0);
    }

    #[test]
    fn test_faculty_role_maps_to_token_role() {
        assert_eq!(Role::from(FacultyRole::HeadOfDepartment), Role::HeadOfDepartment);
        assert_eq!(FacultyRole::AssociateProfessor.to_string(), "associate_professor");
    }

    #[test]
    fn test_change_password_accepts_old_password_alias() {
        let dto: ChangePasswordDto = serde_json::from_str(
            r#"{"old_password": "secret", "new_password": "longer-secret"}"#,
        )
        .unwrap();
        assert_eq!(dto.current_password, "secret");
        assert!(dto.validate().is_ok());
    }
}
