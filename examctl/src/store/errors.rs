use thiserror::Error;

/// Unified error type for store operations that application code can handle
#[derive(Error, Debug)]
pub enum StoreError {
    /// Entity not found by the given identifier
    #[error("Entity not found")]
    NotFound,

    /// Unique constraint violation
    #[error("Unique constraint violation: {constraint}")]
    UniqueViolation {
        constraint: String,
        /// User-safe description of the conflict
        message: String,
    },

    /// Compare-and-swap update rejected: the record is not in any of the
    /// expected pre-states
    #[error("Invalid transition: record is {current}")]
    InvalidTransition { current: String },

    /// Catch-all for non-recoverable errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Type alias for store operation results
pub type Result<T> = std::result::Result<T, StoreError>;
