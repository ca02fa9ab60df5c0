//! Axum router assembly.

use axum::Router;
use axum::routing::{any, get};
use tower_http::trace::TraceLayer;

use crate::api::overrides;
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Serves the plain-text override endpoints at the root (any method) and
/// the JSON API under `/api`. Includes a [`TraceLayer`] that logs each HTTP
/// request/response at the `DEBUG` level using the `tracing` ecosystem.
pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/turnOn", any(overrides::turn_on))
        .route("/turnOff", any(overrides::turn_off))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
