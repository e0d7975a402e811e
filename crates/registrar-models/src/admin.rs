use serde::Serialize;
use utoipa::ToSchema;

use crate::faculty::FacultyResponse;
use crate::students::StudentResponse;

/// Accounts created through self-registration that still await activation.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PendingActivations {
    pub faculty: Vec<FacultyResponse>,
    pub students: Vec<StudentResponse>,
}
