use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role carried in an access token.
///
/// Faculty accounts carry their faculty role; every student carries
/// [`Role::Student`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    HeadOfDepartment,
    Professor,
    AssociateProfessor,
    AssistantProfessor,
    Student,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    pub fn is_faculty(self) -> bool {
        !matches!(self, Self::Student)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::HeadOfDepartment => "head_of_department",
            Self::Professor => "professor",
            Self::AssociateProfessor => "associate_professor",
            Self::AssistantProfessor => "assistant_professor",
            Self::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faculty_roles() {
        assert!(Role::Admin.is_faculty());
        assert!(Role::HeadOfDepartment.is_faculty());
        assert!(Role::AssistantProfessor.is_faculty());
        assert!(!Role::Student.is_faculty());
    }

    #[test]
    fn test_serialization_matches_display() {
        for role in [
            Role::Admin,
            Role::HeadOfDepartment,
            Role::Professor,
            Role::AssociateProfessor,
            Role::AssistantProfessor,
            Role::Student,
        ] {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role));
        }
    }
}
