//! Transaction manager for atomic units of work.
//!
//! A unit of work receives the transaction-scoped connection as an explicit
//! argument and issues every statement through it; there is no ambient or
//! context-keyed transaction lookup. The manager makes a single attempt per
//! call: callers that want retries re-invoke it.

use futures::future::BoxFuture;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::warn;

use crate::types::errors::TransactionError;

/// Runs caller-supplied units of work under one database transaction.
#[derive(Clone)]
pub struct TxManager {
    pool: SqlitePool,
}

impl TxManager {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The pool backing this manager, for reads that do not need a
    /// transaction.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Execute `work` inside a single transaction.
    ///
    /// Commits when the unit of work returns `Ok`; rolls back and propagates
    /// the original error unchanged when it returns `Err`. A rollback failure
    /// is logged but never masks the unit's own error. Dropping the returned
    /// future mid-flight (request cancellation) also rolls the transaction
    /// back.
    ///
    /// SQLite runs every transaction serializably, which subsumes the
    /// read-committed isolation this contract requires.
    pub async fn read_committed<T, E, F>(&self, work: F) -> Result<T, E>
    where
        T: Send,
        E: From<TransactionError> + Send,
        F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, Result<T, E>> + Send,
    {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| E::from(TransactionError::Begin(e.to_string())))?;

        match work(&mut tx).await {
            Ok(value) => {
                tx.commit()
                    .await
                    .map_err(|e| E::from(TransactionError::Commit(e.to_string())))?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "rollback failed after unit of work error");
                }
                Err(err)
            }
        }
    }
}
