pub mod errors;

pub use errors::{DatabaseError, RepositoryError, TransactionError};

pub type DatabaseResult<T> = Result<T, DatabaseError>;
pub type RepositoryResult<T> = Result<T, RepositoryError>;
