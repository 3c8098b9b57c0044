//! Error type for the chat service.

use parley_database::{RepositoryError, TransactionError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatServiceError {
    /// Caller input violates a precondition.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),
}
