//! Error type for the user service.

use parley_database::{RepositoryError, TransactionError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserServiceError {
    /// Caller input violates a precondition.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("password hashing failed")]
    PasswordHash,

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),
}
