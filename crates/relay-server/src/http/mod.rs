//! HTTP surface of Relay.
//!
//! Provides endpoints for:
//! - Async task submission (`POST /execute`)
//! - Synchronous execution for testing (`POST /execute/sync`)
//! - Status polling (`GET /status/{task_id}`)
//! - Health check (`GET /health`)

use std::future::Future;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod handlers;
pub mod responses;

/// Create the HTTP router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/execute", post(handlers::execute))
        .route("/execute/sync", post(handlers::execute_sync))
        .route("/status/:task_id", get(handlers::status))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve the router until the shutdown future resolves, then finish
/// in-flight requests and return.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}
