use crate::entity::EntityId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when manipulating the registry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    /// The requested entity ID does not exist in the registry.
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    /// An entity was rejected at creation because its values are malformed.
    #[error("validation error: {0}")]
    Validation(String),
}
