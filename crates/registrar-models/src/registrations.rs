//! Course registrations and their approval workflow states.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use registrar_core::AppError;

/// `Pending` moves to `Approved` or `Rejected`; both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "approval_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(AppError::invalid_argument(anyhow::anyhow!(
                "Invalid approval status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct CourseRegistration {
    pub id: i32,
    pub student_id: i32,
    pub course_id: i32,
    pub approval_status: ApprovalStatus,
    pub comments: Option<String>,
    /// Amount charged at enrollment; a rejection refunds exactly this.
    pub fees_paid: i64,
}

impl CourseRegistration {
    /// Rejected registrations no longer hold a seat and may be retried.
    pub fn is_active(&self) -> bool {
        self.approval_status != ApprovalStatus::Rejected
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct EnrollDto {
    pub student_id: i32,
    pub course_id: i32,
}

/// Optional reviewer note attached on approval or rejection.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ReviewParams {
    pub comments: Option<String>,
}
