//! HTTP server
//!
//! Routes:
//! - `GET /api/next-task` - highest-priority open task (secret required)
//! - `GET /api/debug-list?q=` - databases visible to the token (secret required)
//! - `GET /health` - liveness, no secret

pub mod api;
pub mod auth;
pub mod state;

use anyhow::{Context, Result};
use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::{AppState, Clock};

/// Start the web server and run until Ctrl-C
pub async fn serve(state: AppState) -> Result<()> {
    let host = state.config.server.host.clone();
    let port = state.config.server.port;

    if state.secret().is_none() {
        tracing::warn!("NEXT_TASK_SECRET is not set - all API requests will be rejected");
    }

    let app = create_router(state);

    let listener = bind(&host, port).await?;
    let addr = listener.local_addr()?;
    tracing::info!("Starting next-task server on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

/// Bind the listener, resolving hostnames as well as IPv4/IPv6 literals
async fn bind(host: &str, port: u16) -> Result<TcpListener> {
    TcpListener::bind((host, port))
        .await
        .with_context(|| format!("failed to bind {} port {}", host, port))
}

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/next-task", get(api::next_task))
        .route("/debug-list", get(api::debug_list))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_secret,
        ));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(api::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
