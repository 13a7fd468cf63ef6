use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use visit_counter::{create_router, init_tracing, AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    // A missing .env file is not an error
    dotenvy::dotenv().ok();
    init_tracing();

    info!(
        "Starting Visit Counter API server v{}...",
        env!("CARGO_PKG_VERSION")
    );

    let config = AppConfig::from_env()?;
    let app = create_router(&config)?;

    let endpoint = config.server.bind_addr();
    let listener = TcpListener::bind(&endpoint).await?;
    info!("Backend API running on {}", endpoint);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    // ---
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {}", err);
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

    info!("Shutdown signal received");
}
