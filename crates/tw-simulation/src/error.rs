use tw_core::CoreError;

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised while building or configuring a simulation.
///
/// Ticking itself never fails; these come from setup calls.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// The registry rejected an operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A task with the same name is already registered.
    #[error("task already registered: \"{0}\"")]
    DuplicateTask(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
