use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::discovery;
use super::health;
use super::middleware::logging_middleware;
use super::state::AppState;
use super::tools;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .route(
            "/.well-known/oauth-protected-resource",
            get(discovery::protected_resource),
        )
        .nest("/tools", tools::create_tools_router())
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
