use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::{debug, info};

use common::logger;

use crate::config::RelayConfig;
use crate::services::relay_service::SignalRelay;
use crate::services::telegram_service::TelegramNotifier;

mod api;
mod config;
mod services;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env first so RUST_LOG set there reaches the logger.
    dotenv().ok();
    logger::setup_logger();
    debug!("Signal relay starting up...");

    let config = RelayConfig::from_env()?;
    debug!("Loaded configuration: {:?}", config);

    let notifier = TelegramNotifier::new(&config)?;
    let relay = Arc::new(SignalRelay::new(Arc::new(notifier)));

    if let Some(dir) = &config.static_dir {
        info!("Serving dashboard bundle from {}", dir.display());
    }
    let app = api::relay_router(relay, config.static_dir.as_deref());

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("Signal relay listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Signal relay stopped.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received, draining in-flight requests.");
}
