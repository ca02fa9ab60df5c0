//! HTTP handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod overrides;
pub mod status;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/override", post(overrides::submit))
        .route("/status", get(status::get))
}
