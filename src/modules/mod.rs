//! Feature modules. Each one has a `service` (business rules over the
//! store), a `controller` (axum handlers with OpenAPI annotations) and a
//! `router`.

pub mod admin;
pub mod attendance;
pub mod auth;
pub mod courses;
pub mod departments;
pub mod exams;
pub mod faculty;
pub mod grades;
pub mod registrations;
pub mod students;

use registrar_core::AppError;

/// Fails with `NotFound` when a list query matched nothing.
pub(crate) fn non_empty<T>(items: Vec<T>, message: &'static str) -> Result<Vec<T>, AppError> {
    if items.is_empty() {
        return Err(AppError::not_found(anyhow::anyhow!(message)));
    }
    Ok(items)
}
