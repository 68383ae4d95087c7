use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, auth::ServerState};
use service::{BookConfig, ContactBook};

fn build_cors() -> CorsLayer {
    CorsLayer::new()
}

/// Open the stores described by `cfg` and wrap them in router state.
pub fn build_state(cfg: &AppConfig) -> ServerState {
    let book = ContactBook::open(&BookConfig::from(cfg));
    ServerState { book: Arc::new(book) }
}

/// Build the router for the given configuration.
pub fn build_app(cfg: &AppConfig) -> Router {
    routes::build_router(build_state(cfg), build_cors())
}

/// Resolves on Ctrl+C (and SIGTERM on unix).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for Ctrl+C");
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
                warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C"),
        _ = terminate => info!("received SIGTERM"),
    }
}

/// Public entry: build the app and serve until a shutdown signal arrives.
/// In-flight requests finish before this returns.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    common::env::ensure_data_dir(&cfg.storage.data_dir).await?;
    if cfg.session.secret == configs::DEV_SESSION_SECRET {
        warn!("using the development session secret; set SESSION_SECRET or session.secret");
    }

    let app = build_app(&cfg);

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr()).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!(%addr, data_dir = %cfg.storage.data_dir, layout = ?cfg.storage.layout, "starting contact book server");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
