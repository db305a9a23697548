//! Route configuration for the gateway API.

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::timeout::TimeoutLayer;

use super::handlers::*;

/// Create the full router with all gateway routes.
pub fn create_router(service: SharedService, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/getBlockHashTransactions/{block_hash}", get(block_transactions_handler))
        .route("/getSyncStatus", get(sync_status_handler))
        .route("/getSyncStatus/", get(sync_status_handler))
        .route("/rpc", post(rpc_handler))
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(service)
}
