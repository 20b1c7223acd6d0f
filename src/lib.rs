pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use state::AppState;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the application router with every layer attached. Shared between
/// the server binary and the integration tests.
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(
            state
                .config
                .cors_allowed_origins
                .split(',')
                .filter_map(|origin| origin.trim().parse::<HeaderValue>().ok())
                .collect::<Vec<_>>(),
        );

    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .nest("/api/comments", routes::comments::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            utils::middleware::auth_middleware,
        ))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "Comment service is running!"
}
