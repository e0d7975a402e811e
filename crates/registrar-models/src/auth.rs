//! Login and self-registration payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use registrar_auth::Role;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    #[schema(example = "password123")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: LoginUser,
}

/// Student self-registration. The account stays inactive until an
/// administrator activates it.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterStudentDto {
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
}

/// Faculty self-registration. Registered faculty always start as an
/// inactive professor.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterFacultyDto {
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
    pub department_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_requires_email() {
        let request = LoginRequest {
            email: "nope".to_string(),
            password: "x".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
