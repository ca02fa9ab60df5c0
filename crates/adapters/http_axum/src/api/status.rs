//! Schedule status handler.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use nightlight_app::status::ScheduleStatus;
use nightlight_domain::device::DeviceState;
use nightlight_domain::time::TimeOfDay;
use nightlight_domain::window::NightWindow;

use crate::state::AppState;

/// JSON view of a [`ScheduleStatus`] snapshot.
#[derive(Serialize)]
pub struct StatusResponse {
    pub window: NightWindow,
    pub night_state: DeviceState,
    pub commanded: Option<DeviceState>,
    pub is_night: bool,
    pub next_transition: Option<TimeOfDay>,
    pub last_error: Option<String>,
}

impl From<ScheduleStatus> for StatusResponse {
    fn from(status: ScheduleStatus) -> Self {
        Self {
            window: status.window,
            night_state: status.night_state,
            commanded: status.commanded,
            is_night: status.is_night,
            next_transition: status.next_transition,
            last_error: status.last_error,
        }
    }
}

/// `GET /api/status`
pub async fn get(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse::from(state.status.current()))
}
