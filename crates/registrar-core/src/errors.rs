//! Application error type shared by every layer.
//!
//! Services return [`AppError`] and propagate it with `?`. Each error carries
//! an [`ErrorKind`] that decides its HTTP status; anything that is not one of
//! the expected kinds (database transport errors, hashing failures) converts
//! into [`ErrorKind::Internal`] through the blanket `From` impl.

use std::fmt;

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

/// Category of failure, independent of the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Entity absent for a key or filter.
    NotFound,
    /// Uniqueness violation.
    AlreadyExists,
    /// Missing or malformed input.
    InvalidArgument,
    /// Transition out of a terminal or disallowed state.
    InvalidState,
    /// Domain rule violated (vacancy, balance, marks, dates, roles).
    BusinessRuleViolation,
    /// Credential mismatch, inactive account, or bad token.
    Unauthorized,
    /// Authenticated, but not allowed to perform the operation.
    Forbidden,
    /// Unexpected failure.
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::AlreadyExists | Self::InvalidState => StatusCode::CONFLICT,
            Self::InvalidArgument => StatusCode::BAD_REQUEST,
            Self::BusinessRuleViolation => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub kind: ErrorKind,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status: kind.status(),
            kind,
            error: err.into(),
        }
    }

    /// Overrides the HTTP status while keeping the kind.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::internal(anyhow::anyhow!(message.into()))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotFound, err)
    }

    pub fn already_exists<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::AlreadyExists, err)
    }

    pub fn invalid_argument<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::InvalidArgument, err)
    }

    /// Request body failed DTO validation.
    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::InvalidArgument, err).with_status(StatusCode::UNPROCESSABLE_ENTITY)
    }

    pub fn invalid_state<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::InvalidState, err)
    }

    pub fn business_rule<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::BusinessRuleViolation, err)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, anyhow::anyhow!(message.into()))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, anyhow::anyhow!(message.into()))
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(kind = ?self.kind, error = ?self.error, "request failed");
        } else {
            tracing::warn!(kind = ?self.kind, error = %self.error, "request rejected");
        }

        let body = Json(json!({
            "error": self.error.to_string(),
            "kind": self.kind,
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
