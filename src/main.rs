//! Balloon Dispatch - Application Entry Point
//!
//! Connects to the database and runs the contest processing scheduler until
//! Ctrl+C or SIGTERM.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use balloon_dispatch::{
    clients::JudgeClients,
    config::Config,
    db::{self, PgStore},
    scheduler::ContestScheduler,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Balloon Dispatch...");

    // Initialize database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database).await?;

    // Run database migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    // Create application state
    let clients = JudgeClients::new(config.judges.clone(), &config.retry)?;
    let state = AppState::new(Arc::new(PgStore::new(db_pool)), clients);

    // Create and setup scheduler
    let mut scheduler = ContestScheduler::new(state, config.scheduler.clone()).await?;
    scheduler.setup_jobs().await?;

    tracing::info!(
        retry_interval_secs = config.retry.interval.as_secs(),
        retry_max_attempts = ?config.retry.max_attempts,
        "Scheduler ready, starting"
    );
    scheduler.start().await?;

    shutdown_signal().await;

    // Graceful shutdown
    tracing::info!("Shutting down scheduler...");
    scheduler.shutdown().await?;

    tracing::info!("Balloon Dispatch shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
