//! Embedded database migrations, one set per service.

use anyhow::Context;
use sqlx::SqlitePool;
use tracing::info;

pub static USER_MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations/users");
pub static CHAT_MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations/chats");

/// Apply the user service schema (`users`, `user_logs`).
pub async fn run_user_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    USER_MIGRATOR
        .run(pool)
        .await
        .context("user database migrations failed")?;
    info!("user database migrations applied");
    Ok(())
}

/// Apply the chat service schema (`chats`, `chat_logs`).
pub async fn run_chat_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    CHAT_MIGRATOR
        .run(pool)
        .await
        .context("chat database migrations failed")?;
    info!("chat database migrations applied");
    Ok(())
}
