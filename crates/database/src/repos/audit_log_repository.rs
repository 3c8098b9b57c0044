//! Audit log repository.
//!
//! Appends one row per mutation into the service's companion log table. Rows
//! are never updated or deleted.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqliteConnection;

use crate::entities::audit::NewAuditEntry;
use crate::types::{errors::RepositoryError, RepositoryResult};

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn record(
        &self,
        conn: &mut SqliteConnection,
        entry: &NewAuditEntry,
    ) -> RepositoryResult<()>;
}

/// The companion log table an audit repository writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditTable {
    UserLogs,
    ChatLogs,
}

impl AuditTable {
    fn as_str(&self) -> &'static str {
        match self {
            AuditTable::UserLogs => "user_logs",
            AuditTable::ChatLogs => "chat_logs",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SqliteAuditLogRepository {
    table: AuditTable,
}

impl SqliteAuditLogRepository {
    pub fn new(table: AuditTable) -> Self {
        Self { table }
    }
}

#[async_trait]
impl AuditLogRepository for SqliteAuditLogRepository {
    async fn record(
        &self,
        conn: &mut SqliteConnection,
        entry: &NewAuditEntry,
    ) -> RepositoryResult<()> {
        let statement = format!(
            "INSERT INTO {} (action, entity_id, created_at) VALUES (?, ?, ?)",
            self.table.as_str()
        );

        sqlx::query(&statement)
            .bind(entry.action.as_str())
            .bind(entry.entity_id)
            .bind(Utc::now())
            .execute(&mut *conn)
            .await
            .map_err(|e| RepositoryError::Execution(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::audit::AuditAction;
    use crate::testing::{chat_test_pool, user_test_pool};

    #[tokio::test]
    async fn record_appends_one_row() {
        let (pool, _dir) = user_test_pool().await;
        let repo = SqliteAuditLogRepository::new(AuditTable::UserLogs);
        let mut conn = pool.acquire().await.unwrap();

        repo.record(&mut conn, &NewAuditEntry::new(AuditAction::Created, 7))
            .await
            .unwrap();

        let (action, entity_id): (String, i64) =
            sqlx::query_as("SELECT action, entity_id FROM user_logs")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(action, "created");
        assert_eq!(entity_id, 7);
    }

    #[tokio::test]
    async fn sentinel_entity_id_is_stored_verbatim() {
        let (pool, _dir) = chat_test_pool().await;
        let repo = SqliteAuditLogRepository::new(AuditTable::ChatLogs);
        let mut conn = pool.acquire().await.unwrap();

        repo.record(&mut conn, &NewAuditEntry::new(AuditAction::MessageSent, 0))
            .await
            .unwrap();

        let entity_id: i64 = sqlx::query_scalar("SELECT entity_id FROM chat_logs")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(entity_id, 0);
    }
}
