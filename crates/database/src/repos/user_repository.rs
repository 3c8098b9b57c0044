//! User repository for database operations.
//!
//! Every method takes the connection it must run on; inside a unit of work
//! the transaction manager supplies the transaction-scoped connection, so the
//! write participates in that transaction.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};

use crate::entities::user::{NewUser, User, UserPatch, UserRole};
use crate::types::{errors::RepositoryError, RepositoryResult};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return the generated id.
    async fn create(&self, conn: &mut SqliteConnection, user: &NewUser) -> RepositoryResult<i64>;

    async fn get(&self, conn: &mut SqliteConnection, id: i64) -> RepositoryResult<User>;

    /// Apply a sparse patch. `updated_at` is always advanced.
    async fn update(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        patch: &UserPatch,
    ) -> RepositoryResult<()>;

    async fn delete(&self, conn: &mut SqliteConnection, id: i64) -> RepositoryResult<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteUserRepository;

impl SqliteUserRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, conn: &mut SqliteConnection, user: &NewUser) -> RepositoryResult<i64> {
        let result = sqlx::query(
            "INSERT INTO users (name, email, password_hash, role, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(Utc::now())
        .execute(&mut *conn)
        .await
        .map_err(|e| RepositoryError::Execution(e.to_string()))?;

        Ok(result.last_insert_rowid())
    }

    async fn get(&self, conn: &mut SqliteConnection, id: i64) -> RepositoryResult<User> {
        let row = sqlx::query(
            "SELECT id, name, email, role, created_at, updated_at FROM users WHERE id = ? LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| RepositoryError::Execution(e.to_string()))?;

        match row {
            Some(row) => map_user_row(&row),
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn update(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        patch: &UserPatch,
    ) -> RepositoryResult<()> {
        // Build the SET clause from the supplied fields only.
        let mut assignments = Vec::new();
        if patch.name.is_some() {
            assignments.push("name = ?");
        }
        if patch.email.is_some() {
            assignments.push("email = ?");
        }
        assignments.push("updated_at = ?");

        let statement = format!("UPDATE users SET {} WHERE id = ?", assignments.join(", "));

        let mut query = sqlx::query(&statement);
        if let Some(name) = &patch.name {
            query = query.bind(name);
        }
        if let Some(email) = &patch.email {
            query = query.bind(email);
        }
        query = query.bind(Utc::now()).bind(id);

        let result = query
            .execute(&mut *conn)
            .await
            .map_err(|e| RepositoryError::Execution(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, conn: &mut SqliteConnection, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| RepositoryError::Execution(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

fn map_user_row(row: &SqliteRow) -> RepositoryResult<User> {
    let role: String = row
        .try_get("role")
        .map_err(|e| RepositoryError::Execution(e.to_string()))?;

    Ok(User {
        id: row
            .try_get("id")
            .map_err(|e| RepositoryError::Execution(e.to_string()))?,
        name: row
            .try_get("name")
            .map_err(|e| RepositoryError::Execution(e.to_string()))?,
        email: row
            .try_get("email")
            .map_err(|e| RepositoryError::Execution(e.to_string()))?,
        role: UserRole::from(role.as_str()),
        created_at: row
            .try_get("created_at")
            .map_err(|e| RepositoryError::Execution(e.to_string()))?,
        updated_at: row
            .try_get("updated_at")
            .map_err(|e| RepositoryError::Execution(e.to_string()))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::user_test_pool;

    fn sample_user() -> NewUser {
        NewUser {
            name: "bob".to_string(),
            email: "b@x.com".to_string(),
            password_hash: "not-a-real-hash".to_string(),
            role: UserRole::User,
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let (pool, _dir) = user_test_pool().await;
        let repo = SqliteUserRepository::new();
        let mut conn = pool.acquire().await.unwrap();

        let id = repo.create(&mut conn, &sample_user()).await.unwrap();
        assert!(id > 0);

        let user = repo.get(&mut conn, id).await.unwrap();
        assert_eq!(user.name, "bob");
        assert_eq!(user.email, "b@x.com");
        assert_eq!(user.role, UserRole::User);
        assert!(user.updated_at.is_none());
    }

    #[tokio::test]
    async fn partial_update_touches_only_supplied_fields() {
        let (pool, _dir) = user_test_pool().await;
        let repo = SqliteUserRepository::new();
        let mut conn = pool.acquire().await.unwrap();

        let id = repo.create(&mut conn, &sample_user()).await.unwrap();
        let patch = UserPatch {
            name: Some("robert".to_string()),
            email: None,
        };
        repo.update(&mut conn, id, &patch).await.unwrap();

        let user = repo.get(&mut conn, id).await.unwrap();
        assert_eq!(user.name, "robert");
        assert_eq!(user.email, "b@x.com");
        assert!(user.updated_at.is_some());
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() {
        let (pool, _dir) = user_test_pool().await;
        let repo = SqliteUserRepository::new();
        let mut conn = pool.acquire().await.unwrap();

        let patch = UserPatch {
            name: Some("ghost".to_string()),
            email: None,
        };
        let err = repo.update(&mut conn, 4242, &patch).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn delete_missing_id_is_not_found() {
        let (pool, _dir) = user_test_pool().await;
        let repo = SqliteUserRepository::new();
        let mut conn = pool.acquire().await.unwrap();

        let err = repo.delete(&mut conn, 4242).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let (pool, _dir) = user_test_pool().await;
        let repo = SqliteUserRepository::new();
        let mut conn = pool.acquire().await.unwrap();

        let id = repo.create(&mut conn, &sample_user()).await.unwrap();
        repo.delete(&mut conn, id).await.unwrap();

        let err = repo.get(&mut conn, id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
