use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use booking_server::config::{ConfigError, ServerConfig, StoreConfig};
use booking_server::store::{MockStore, PgStore, RailStore, StoreError};
use booking_server::web::{AppState, create_router};

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "booking_server=info,tower_http=info";

/// Reasons the server can fail to start or keep running.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;

    // The pool lives for the whole process and is closed after shutdown
    let (store, pg) = match &config.store {
        StoreConfig::Postgres(db) => {
            let pg = PgStore::connect(db).await?;
            if db.run_migrations {
                pg.migrate().await?;
            }
            let store: Arc<dyn RailStore> = Arc::new(pg.clone());
            (store, Some(pg))
        }
        StoreConfig::Mock(path) => {
            warn!(path = %path.display(), "using in-memory store; bookings are not persisted");
            let store: Arc<dyn RailStore> = Arc::new(MockStore::from_json_file(path)?);
            (store, None)
        }
    };

    let state = AppState::new(store);
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Railway reservation server listening on http://{}", config.bind_addr);
    info!("  GET  /api/locations  - Station names");
    info!("  GET  /api/trains     - Search trains (from, to, date, class)");
    info!("  POST /api/book       - Create a booking");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pg) = pg {
        pg.close().await;
    }
    info!("server stopped");
    Ok(())
}

/// Resolve on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl-C");
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
                error!(error = %e, "failed to listen for SIGTERM");
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
    info!("shutdown signal received");
}
