//! User domain service.
//!
//! Every mutating operation runs exactly one entity write and one audit-log
//! write inside a single transaction: both commit together or neither is
//! visible. A failed audit write is as fatal as a failed entity write.

use std::sync::Arc;

use parley_database::{
    AuditAction, AuditLogRepository, NewAuditEntry, NewUser, TransactionError, TxManager, User,
    UserPatch, UserRepository,
};
use tracing::info;

use crate::types::{CreateUserCommand, UserServiceError};
use crate::utils::password::hash_password;
use crate::utils::validation::validate_create;

pub struct UserService {
    users: Arc<dyn UserRepository>,
    audit: Arc<dyn AuditLogRepository>,
    tx: TxManager,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        audit: Arc<dyn AuditLogRepository>,
        tx: TxManager,
    ) -> Self {
        Self { users, audit, tx }
    }

    /// Validate the command, hash the credential, then atomically insert the
    /// user and its "created" audit row. Returns the generated id.
    pub async fn create(&self, command: CreateUserCommand) -> Result<i64, UserServiceError> {
        validate_create(&command)?;

        let new_user = NewUser {
            password_hash: hash_password(&command.password)?,
            name: command.name,
            email: command.email,
            role: command.role,
        };

        let users = Arc::clone(&self.users);
        let audit = Arc::clone(&self.audit);
        let id = self
            .tx
            .read_committed(move |conn| {
                Box::pin(async move {
                    let id = users.create(&mut *conn, &new_user).await?;
                    audit
                        .record(&mut *conn, &NewAuditEntry::new(AuditAction::Created, id))
                        .await?;
                    Ok::<i64, UserServiceError>(id)
                })
            })
            .await?;

        info!(id, "user created");
        Ok(id)
    }

    /// Single read, outside any transaction.
    pub async fn get(&self, id: i64) -> Result<User, UserServiceError> {
        let mut conn = self
            .tx
            .pool()
            .acquire()
            .await
            .map_err(|e| TransactionError::Acquire(e.to_string()))?;

        let user = self.users.get(&mut conn, id).await?;
        Ok(user)
    }

    /// Atomically apply a sparse patch and its "updated" audit row.
    pub async fn update(&self, id: i64, patch: UserPatch) -> Result<(), UserServiceError> {
        let users = Arc::clone(&self.users);
        let audit = Arc::clone(&self.audit);
        self.tx
            .read_committed(move |conn| {
                Box::pin(async move {
                    users.update(&mut *conn, id, &patch).await?;
                    audit
                        .record(&mut *conn, &NewAuditEntry::new(AuditAction::Updated, id))
                        .await?;
                    Ok::<(), UserServiceError>(())
                })
            })
            .await?;

        info!(id, "user updated");
        Ok(())
    }

    /// Atomically delete the row and write its "deleted" audit row.
    pub async fn delete(&self, id: i64) -> Result<(), UserServiceError> {
        let users = Arc::clone(&self.users);
        let audit = Arc::clone(&self.audit);
        self.tx
            .read_committed(move |conn| {
                Box::pin(async move {
                    users.delete(&mut *conn, id).await?;
                    audit
                        .record(&mut *conn, &NewAuditEntry::new(AuditAction::Deleted, id))
                        .await?;
                    Ok::<(), UserServiceError>(())
                })
            })
            .await?;

        info!(id, "user deleted");
        Ok(())
    }
}
