use crate::api::handlers;
use crate::api::request_id::propagate_request_id;
use crate::api::AppState;
use anyhow::{Context, Result};
use axum::middleware;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/customers",
            get(handlers::list_customers).post(handlers::create_customer),
        )
        .route("/customers/filtered", get(handlers::filtered_customers))
        .route(
            "/customers/filtered/download-csv",
            get(handlers::download_filtered_csv),
        )
        .route("/clusters", get(handlers::clusters))
        .route("/clusters/live", get(handlers::live_clusters))
        .route("/strategies", get(handlers::strategies))
        .route("/model-performance", get(handlers::model_performance))
        .route("/summary", get(handlers::summary))
        .route("/download-csv", get(handlers::download_csv))
}

/// All routes, mounted at the root and again under `/api`
pub fn build_router(state: AppState) -> Router {
    let routes = routes();
    Router::new()
        .merge(routes.clone())
        .nest("/api", routes)
        .layer(middleware::from_fn(propagate_request_id))
        .with_state(state)
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                warn!("failed to register signal handlers; falling back to ctrl-c");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Bind `addr` and serve until SIGTERM/SIGINT
pub async fn serve(addr: &str, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind {}", addr))?;
    info!(addr = %addr, "listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .context("Server error")?;

    info!("shutdown complete");
    Ok(())
}
