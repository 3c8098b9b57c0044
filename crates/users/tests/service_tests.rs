//! Integration tests for the user service against a real SQLite database.

use std::sync::Arc;

use async_trait::async_trait;
use parley_config::DatabaseConfig;
use parley_database::{
    initialize_user_database, AuditLogRepository, AuditTable, NewAuditEntry, RepositoryError,
    RepositoryResult, SqliteAuditLogRepository, SqliteUserRepository, TxManager, UserPatch,
    UserRole,
};
use parley_users::types::CreateUserCommand;
use parley_users::{UserService, UserServiceError};
use sqlx::{SqliteConnection, SqlitePool};
use tempfile::TempDir;

async fn test_pool() -> (SqlitePool, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("users.db");
    let config = DatabaseConfig {
        url: format!("sqlite://{}", db_path.display()),
        max_connections: 5,
    };
    let pool = initialize_user_database(&config).await.unwrap();
    (pool, temp_dir)
}

fn service(pool: &SqlitePool) -> UserService {
    UserService::new(
        Arc::new(SqliteUserRepository::new()),
        Arc::new(SqliteAuditLogRepository::new(AuditTable::UserLogs)),
        TxManager::new(pool.clone()),
    )
}

fn bob() -> CreateUserCommand {
    CreateUserCommand {
        name: "bob".to_string(),
        email: "b@x.com".to_string(),
        password: "longenough1".to_string(),
        password_confirm: "longenough1".to_string(),
        role: UserRole::User,
    }
}

async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Audit repository that always fails, for exercising rollback.
struct FailingAuditLog;

#[async_trait]
impl AuditLogRepository for FailingAuditLog {
    async fn record(
        &self,
        _conn: &mut SqliteConnection,
        _entry: &NewAuditEntry,
    ) -> RepositoryResult<()> {
        Err(RepositoryError::Execution("injected log failure".to_string()))
    }
}

fn service_with_failing_audit(pool: &SqlitePool) -> UserService {
    UserService::new(
        Arc::new(SqliteUserRepository::new()),
        Arc::new(FailingAuditLog),
        TxManager::new(pool.clone()),
    )
}

#[tokio::test]
async fn create_then_get_returns_the_stored_user() {
    let (pool, _dir) = test_pool().await;
    let service = service(&pool);

    let id = service.create(bob()).await.unwrap();
    assert!(id > 0);

    let user = service.get(id).await.unwrap();
    assert_eq!(user.name, "bob");
    assert_eq!(user.email, "b@x.com");
    assert!(user.updated_at.is_none());

    // exactly one audit row, labelled "created", pointing at the new user
    let (action, entity_id): (String, i64) =
        sqlx::query_as("SELECT action, entity_id FROM user_logs")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(action, "created");
    assert_eq!(entity_id, id);
}

#[tokio::test]
async fn create_stores_a_hash_not_the_password() {
    let (pool, _dir) = test_pool().await;
    let service = service(&pool);

    let id = service.create(bob()).await.unwrap();

    let stored: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE id = ?")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_ne!(stored, "longenough1");
    assert!(stored.starts_with("$argon2"));
}

#[tokio::test]
async fn mismatched_confirmation_is_rejected_without_writes() {
    let (pool, _dir) = test_pool().await;
    let service = service(&pool);

    let mut command = bob();
    command.password_confirm = "different11".to_string();

    let err = service.create(command).await.unwrap_err();
    assert!(matches!(err, UserServiceError::Validation(_)));
    assert_eq!(count(&pool, "users").await, 0);
    assert_eq!(count(&pool, "user_logs").await, 0);
}

#[tokio::test]
async fn get_is_idempotent() {
    let (pool, _dir) = test_pool().await;
    let service = service(&pool);

    let id = service.create(bob()).await.unwrap();
    let first = service.get(id).await.unwrap();
    let second = service.get(id).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn get_missing_user_is_not_found() {
    let (pool, _dir) = test_pool().await;
    let service = service(&pool);

    let err = service.get(4242).await.unwrap_err();
    assert!(matches!(
        err,
        UserServiceError::Repository(RepositoryError::NotFound)
    ));
}

#[tokio::test]
async fn partial_update_changes_only_supplied_fields() {
    let (pool, _dir) = test_pool().await;
    let service = service(&pool);

    let id = service.create(bob()).await.unwrap();
    service
        .update(
            id,
            UserPatch {
                name: Some("robert".to_string()),
                email: None,
            },
        )
        .await
        .unwrap();

    let user = service.get(id).await.unwrap();
    assert_eq!(user.name, "robert");
    assert_eq!(user.email, "b@x.com");
    assert!(user.updated_at.is_some());

    let actions: Vec<String> =
        sqlx::query_scalar("SELECT action FROM user_logs ORDER BY id")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(actions, vec!["created", "updated"]);
}

#[tokio::test]
async fn update_missing_user_is_not_found() {
    let (pool, _dir) = test_pool().await;
    let service = service(&pool);

    let err = service
        .update(
            4242,
            UserPatch {
                name: Some("ghost".to_string()),
                email: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        UserServiceError::Repository(RepositoryError::NotFound)
    ));
    // the failed unit of work must not leave an audit row behind
    assert_eq!(count(&pool, "user_logs").await, 0);
}

#[tokio::test]
async fn delete_removes_user_and_logs_it() {
    let (pool, _dir) = test_pool().await;
    let service = service(&pool);

    let id = service.create(bob()).await.unwrap();
    service.delete(id).await.unwrap();

    let err = service.get(id).await.unwrap_err();
    assert!(matches!(
        err,
        UserServiceError::Repository(RepositoryError::NotFound)
    ));

    let actions: Vec<String> =
        sqlx::query_scalar("SELECT action FROM user_logs ORDER BY id")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(actions, vec!["created", "deleted"]);
}

#[tokio::test]
async fn delete_missing_user_is_not_found() {
    let (pool, _dir) = test_pool().await;
    let service = service(&pool);

    let err = service.delete(4242).await.unwrap_err();
    assert!(matches!(
        err,
        UserServiceError::Repository(RepositoryError::NotFound)
    ));
}

#[tokio::test]
async fn create_rolls_back_when_the_audit_write_fails() {
    let (pool, _dir) = test_pool().await;
    let service = service_with_failing_audit(&pool);

    let err = service.create(bob()).await.unwrap_err();
    assert!(matches!(
        err,
        UserServiceError::Repository(RepositoryError::Execution(_))
    ));

    // the user insert succeeded inside the transaction, but nothing may be
    // durably visible after the rollback
    assert_eq!(count(&pool, "users").await, 0);
    assert_eq!(count(&pool, "user_logs").await, 0);
}

#[tokio::test]
async fn update_rolls_back_when_the_audit_write_fails() {
    let (pool, _dir) = test_pool().await;

    let id = service(&pool).create(bob()).await.unwrap();

    let failing = service_with_failing_audit(&pool);
    let err = failing
        .update(
            id,
            UserPatch {
                name: Some("mallory".to_string()),
                email: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        UserServiceError::Repository(RepositoryError::Execution(_))
    ));

    let user = service(&pool).get(id).await.unwrap();
    assert_eq!(user.name, "bob");
    assert!(user.updated_at.is_none());
}
