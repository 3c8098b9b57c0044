//! Chat repository for database operations.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};

use crate::entities::chat::{Chat, NewChat};
use crate::types::{errors::RepositoryError, RepositoryResult};

#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Insert a chat and return the generated id.
    async fn create(&self, conn: &mut SqliteConnection, chat: &NewChat) -> RepositoryResult<i64>;

    async fn get(&self, conn: &mut SqliteConnection, id: i64) -> RepositoryResult<Chat>;

    async fn delete(&self, conn: &mut SqliteConnection, id: i64) -> RepositoryResult<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteChatRepository;

impl SqliteChatRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ChatRepository for SqliteChatRepository {
    async fn create(&self, conn: &mut SqliteConnection, chat: &NewChat) -> RepositoryResult<i64> {
        // The member list is bound as one JSON argument; failing to encode it
        // means the statement arguments could not be built.
        let usernames = serde_json::to_string(&chat.usernames)
            .map_err(|e| RepositoryError::QueryBuild(e.to_string()))?;

        let result = sqlx::query("INSERT INTO chats (usernames, created_at) VALUES (?, ?)")
            .bind(usernames)
            .bind(Utc::now())
            .execute(&mut *conn)
            .await
            .map_err(|e| RepositoryError::Execution(e.to_string()))?;

        Ok(result.last_insert_rowid())
    }

    async fn get(&self, conn: &mut SqliteConnection, id: i64) -> RepositoryResult<Chat> {
        let row = sqlx::query(
            "SELECT id, usernames, created_at, updated_at FROM chats WHERE id = ? LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| RepositoryError::Execution(e.to_string()))?;

        match row {
            Some(row) => map_chat_row(&row),
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete(&self, conn: &mut SqliteConnection, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM chats WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| RepositoryError::Execution(e.to_string()))?;

        // Uniform policy with the user repository: deleting a missing row is
        // an error, never a silent success.
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

fn map_chat_row(row: &SqliteRow) -> RepositoryResult<Chat> {
    let usernames_json: String = row
        .try_get("usernames")
        .map_err(|e| RepositoryError::Execution(e.to_string()))?;
    let usernames: Vec<String> = serde_json::from_str(&usernames_json)
        .map_err(|e| RepositoryError::Execution(e.to_string()))?;

    Ok(Chat {
        id: row
            .try_get("id")
            .map_err(|e| RepositoryError::Execution(e.to_string()))?,
        usernames,
        created_at: row
            .try_get("created_at")
            .map_err(|e| RepositoryError::Execution(e.to_string()))?,
        updated_at: row
            .try_get("updated_at")
            .map_err(|e| RepositoryError::Execution(e.to_string()))?,
    })
}
