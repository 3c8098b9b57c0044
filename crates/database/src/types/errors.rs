//! Error types for the database layer.
//!
//! These are deliberately coarse: callers only need to distinguish "the row
//! was not there" from internal faults, and the API boundary maps each kind
//! exhaustively to a transport status.

use thiserror::Error;

/// Errors surfaced by repository calls.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Zero rows matched the target id.
    #[error("entity not found")]
    NotFound,

    /// Statement or bound-argument construction failed. Unreachable in
    /// correct code but kept distinct so it never panics.
    #[error("failed to build query: {0}")]
    QueryBuild(String),

    /// The datastore rejected or failed the statement.
    #[error("failed to execute query: {0}")]
    Execution(String),
}

/// Errors raised by the transaction manager itself, as opposed to errors the
/// unit of work returns.
#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("failed to acquire connection: {0}")]
    Acquire(String),

    #[error("failed to begin transaction: {0}")]
    Begin(String),

    #[error("failed to commit transaction: {0}")]
    Commit(String),
}

/// Faults while preparing a database at startup.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("database connection error: {0}")]
    Connection(String),

    #[error("database migration error: {0}")]
    Migration(String),
}
