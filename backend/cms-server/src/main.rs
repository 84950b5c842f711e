use cms_server::error::Result as ServerErrorResult;
use cms_server::{AppState, auth_settings, build_router, logger};

use std::time::Duration;

use log::{error, info};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use tokio::net::TcpListener;

const THROTTLE_PRUNE_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> ServerErrorResult<()> {
    // A missing .env is normal outside development
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = cms_config::Config::load()?;
    config.validate()?;

    // Initialize logger (before any other logging)
    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;

    info!("Starting cms-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(database_path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .busy_timeout(Duration::from_secs(5)),
        )
        .await?;
    info!("Database connection established");

    info!("Running database migrations...");
    cms_db::migrate(&pool).await?;
    info!("Migrations complete");

    let state = AppState::new(pool, auth_settings(&config)?)?;

    // Keep the login throttle's key map from growing without bound
    let authenticator = state.authenticator.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(THROTTLE_PRUNE_INTERVAL);
        loop {
            interval.tick().await;
            authenticator.prune_login_throttle();
        }
    });

    let app = build_router(state, &config.session);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Graceful shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        Err(e) => {
            error!("Failed to listen for SIGINT: {e}");
            std::future::pending::<()>().await;
        }
    }
}
