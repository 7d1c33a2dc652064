pub mod handlers;
pub mod router;
pub mod state;

pub use router::app_router;
pub use state::{AppState, DEFAULT_SOURCE, ServerConfig};

use anyhow::{Context, Result};
use tracing::{info, warn};

/// Bind and run the HTTP server until it stops
pub async fn serve(config: ServerConfig) -> Result<()> {
    if !config.source_path.exists() {
        warn!(
            "Source file {:?} not found; /api/graph-data will return 404 until it is created",
            config.source_path
        );
    }

    let bind_addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    info!(
        "Serving {:?} on http://{}",
        config.source_path,
        listener.local_addr()?
    );

    let app = app_router(AppState::new(config.source_path));
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
