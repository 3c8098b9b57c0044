use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use parley_chats::{build_router, ChatApiState, ChatService};
use parley_config::load as load_config;
use parley_database::{
    initialize_chat_database, prepare_database, run_chat_migrations, AuditTable,
    SqliteAuditLogRepository, SqliteChatRepository, TxManager,
};
use parley_runtime::{shutdown_signal, telemetry};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "chat-server")]
#[command(about = "Parley chat service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server().await,
        Commands::Migrate => run_migrations().await,
    }
}

async fn run_server() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    info!("starting chat service");

    let config = load_config().context("failed to load configuration")?;

    let pool = initialize_chat_database(&config.chats.database)
        .await
        .context("failed to initialise chat database")?;

    let service = ChatService::new(
        Arc::new(SqliteChatRepository),
        Arc::new(SqliteAuditLogRepository::new(AuditTable::ChatLogs)),
        TxManager::new(pool),
    );
    let app = build_router(ChatApiState {
        service: Arc::new(service),
    });

    let address = format!("{}:{}", config.chats.http.address, config.chats.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")?;

    info!("chat service shut down");
    Ok(())
}

async fn run_migrations() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    let config = load_config().context("failed to load configuration")?;

    let pool = prepare_database(&config.chats.database)
        .await
        .context("failed to connect to chat database")?;

    run_chat_migrations(&pool)
        .await
        .context("failed to apply chat migrations")?;

    info!("chat migrations applied");
    Ok(())
}
