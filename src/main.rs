//! Ganudenu server
//!
//! Serves the upload page, the ad creation API and the generated output.

use std::net::SocketAddr;

use ganudenu::{api, config, AppState, Result};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ganudenu=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::init();
    tracing::info!(
        "Starting Ganudenu server on {}:{}",
        config.server.host,
        config.server.port
    );
    if config.auth.api_key.is_none() {
        tracing::warn!("API_KEY is not set, ad creation is open to anyone");
    }

    // Initialize application state
    let state = AppState::new().await?;
    tracing::info!(
        uploads = %config.storage.uploads_path.display(),
        generated = %config.storage.generated_path.display(),
        "Application state initialized"
    );

    // Initialize startup time for uptime tracking
    api::status::init_startup_time();

    let app = api::app(state);

    // Start server
    let listener = TcpListener::bind(config.bind_address()).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tracing::info!("Listening on {}", addr);
    tracing::info!("========================================");
    tracing::info!("  GANUDENU SERVER STARTED SUCCESSFULLY");
    tracing::info!("  Ready to accept connections on {}", addr);
    tracing::info!("========================================");

    axum::serve(listener, app).await?;

    Ok(())
}
