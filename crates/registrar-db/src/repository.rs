use async_trait::async_trait;

use registrar_core::AppError;

use crate::entity::Entity;

/// CRUD contract shared by every entity type and every backend.
///
/// - `get_by_id`, `update` and `delete` fail with `NotFound` for an unknown id.
/// - `add` and `update` fail with `InvalidArgument` when a required field is
///   blank and with `AlreadyExists` on a uniqueness violation.
/// - `delete` fails with `InvalidState` while other rows still reference the
///   entity; nothing is cascaded.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// All rows ordered by id.
    async fn get_all(&self) -> Result<Vec<E>, AppError>;

    async fn get_by_id(&self, id: i32) -> Result<E, AppError>;

    /// Persists `entity` and returns it with its generated id. The incoming
    /// id is ignored.
    async fn add(&self, entity: E) -> Result<E, AppError>;

    /// Replaces every column of the row with the entity's id.
    async fn update(&self, entity: E) -> Result<E, AppError>;

    /// Removes the row and returns its last state.
    async fn delete(&self, id: i32) -> Result<E, AppError>;
}

pub(crate) fn not_found<E: Entity>() -> AppError {
    AppError::not_found(anyhow::anyhow!("No such {} exists", E::LABEL))
}

pub(crate) fn ensure_complete<E: Entity>(entity: &E) -> Result<(), AppError> {
    match entity.missing_field() {
        Some(field) => Err(AppError::invalid_argument(anyhow::anyhow!(
            "{} {} is required",
            capitalize(E::LABEL),
            field
        ))),
        None => Ok(()),
    }
}

pub(crate) fn already_exists<E: Entity>() -> AppError {
    AppError::already_exists(anyhow::anyhow!("{} already exists", capitalize(E::LABEL)))
}

pub(crate) fn still_referenced<E: Entity>() -> AppError {
    AppError::invalid_state(anyhow::anyhow!(
        "Cannot delete {}: it is still referenced by other records",
        E::LABEL
    ))
}

pub(crate) fn missing_reference<E: Entity>(parent: &str) -> AppError {
    AppError::not_found(anyhow::anyhow!(
        "Cannot save {}: referenced {} does not exist",
        E::LABEL,
        parent
    ))
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
