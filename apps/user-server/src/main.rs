use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use parley_config::load as load_config;
use parley_database::{
    initialize_user_database, prepare_database, run_user_migrations, AuditTable,
    SqliteAuditLogRepository, SqliteUserRepository, TxManager,
};
use parley_runtime::{shutdown_signal, telemetry};
use parley_users::{build_router, UserApiState, UserService};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "user-server")]
#[command(about = "Parley user account service")]
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

    info!("starting user service");

    let config = load_config().context("failed to load configuration")?;

    let pool = initialize_user_database(&config.users.database)
        .await
        .context("failed to initialise user database")?;

    let service = UserService::new(
        Arc::new(SqliteUserRepository),
        Arc::new(SqliteAuditLogRepository::new(AuditTable::UserLogs)),
        TxManager::new(pool),
    );
    let app = build_router(UserApiState {
        service: Arc::new(service),
    });

    let address = format!("{}:{}", config.users.http.address, config.users.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")?;

    info!("user service shut down");
    Ok(())
}

async fn run_migrations() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    let config = load_config().context("failed to load configuration")?;

    let pool = prepare_database(&config.users.database)
        .await
        .context("failed to connect to user database")?;

    run_user_migrations(&pool)
        .await
        .context("failed to apply user migrations")?;

    info!("user migrations applied");
    Ok(())
}
