//! Shared application state for axum handlers.

use nightlight_app::override_queue::OverrideSender;
use nightlight_app::status::StatusWatcher;

/// Application state shared across all axum handlers.
///
/// Both halves are cheap handles onto the schedule loop, so cloning the
/// state per request only clones channel endpoints.
#[derive(Clone)]
pub struct AppState {
    /// Producer side of the override queue.
    pub overrides: OverrideSender,
    /// Read-only view of the loop's status.
    pub status: StatusWatcher,
}

impl AppState {
    /// Create a new application state from the loop's handles.
    #[must_use]
    pub fn new(overrides: OverrideSender, status: StatusWatcher) -> Self {
        Self { overrides, status }
    }
}
