//! Parley database crate
//!
//! Connection management, embedded migrations, the transaction manager, and
//! the repositories backing the user and chat services. Each service owns its
//! own database: a pool is prepared from its [`DatabaseConfig`] section and
//! the matching migration set is applied.

use parley_config::DatabaseConfig;
use sqlx::SqlitePool;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod tx;
pub mod types;

pub use connection::prepare_database;
pub use migrations::{run_chat_migrations, run_user_migrations};
pub use tx::TxManager;

pub use repos::{
    AuditLogRepository, AuditTable, ChatRepository, SqliteAuditLogRepository,
    SqliteChatRepository, SqliteUserRepository, UserRepository,
};

pub use entities::{
    audit::{AuditAction, NewAuditEntry},
    chat::{Chat, NewChat},
    user::{NewUser, User, UserPatch, UserRole},
};

pub use types::{
    errors::{DatabaseError, RepositoryError, TransactionError},
    DatabaseResult, RepositoryResult,
};

/// Prepare the user service database: connect and apply its migrations.
pub async fn initialize_user_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::Connection(e.to_string()))?;

    run_user_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::Migration(e.to_string()))?;

    Ok(pool)
}

/// Prepare the chat service database: connect and apply its migrations.
pub async fn initialize_chat_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::Connection(e.to_string()))?;

    run_chat_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::Migration(e.to_string()))?;

    Ok(pool)
}
