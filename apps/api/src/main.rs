use tracing_subscriber::EnvFilter;

use stamp_api::api;
use stamp_api::config::{Config, StorageBackend};
use stamp_api::infrastructure::database;
use stamp_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("stamp_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let state = match config.storage {
        StorageBackend::Postgres => {
            let pool = database::connect(&config).await?;
            database::migrate(&pool).await?;
            tracing::info!("Migrations applied");
            AppState::postgres(pool, config.jwt.clone())
        }
        StorageBackend::Memory => {
            tracing::warn!("STORAGE=memory, data is lost on shutdown");
            AppState::in_memory(config.jwt.clone())
        }
    };

    let app = api::app(state);

    let addr = config.socket_addr()?;
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
