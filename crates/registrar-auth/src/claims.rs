//! JWT claim structure for access tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use registrar_core::AppError;

use crate::role::Role;

/// JWT claims for access tokens.
///
/// `sub` holds the numeric id of the faculty member or student; `role`
/// tells which table that id belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Account id (subject claim)
    pub sub: String,
    pub email: String,
    pub role: Role,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> Result<i32, AppError> {
        self.sub
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid subject in token"))
    }

    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            email: "ada@uni.edu".to_string(),
            role: Role::Student,
            exp: 2,
            iat: 1,
        }
    }

    #[test]
    fn test_user_id_parses_numeric_subject() {
        assert_eq!(claims("42").user_id().unwrap(), 42);
    }

    #[test]
    fn test_user_id_rejects_garbage() {
        let err = claims("not-a-number").user_id().unwrap_err();
        assert!(err.is(registrar_core::ErrorKind::Unauthorized));
    }

    #[test]
    fn test_claims_round_trip_through_json() {
        let json = serde_json::to_value(claims("3")).unwrap();
        assert_eq!(json["role"], "student");
        let back: Claims = serde_json::from_value(json).unwrap();
        assert!(back.is_student());
    }
}
