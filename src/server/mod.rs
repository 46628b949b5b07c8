use crate::config::Config;
use anyhow::{Context, Result};
use awesome_orm::pool::DbPool;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod routes_api;

/// Body served at `/`.
pub const GREETING: &str = "Welcome to the hell !!";

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub db: DbPool,
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .nest("/api", routes_api::api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn index() -> &'static str {
    GREETING
}

async fn health_check() -> &'static str {
    "ok"
}

/// Start the HTTP server and serve until a shutdown signal arrives
pub async fn start_server(config: Config, db: DbPool) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let ctx = AppContext {
        config: Arc::new(config),
        db,
    };
    let app = create_router(ctx);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
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
