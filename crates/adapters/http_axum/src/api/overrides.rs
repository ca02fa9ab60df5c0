//! Manual override handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use nightlight_domain::device::DeviceState;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `POST /api/override`.
#[derive(Deserialize)]
pub struct OverrideRequestBody {
    pub state: DeviceState,
}

/// Body returned once an override is queued.
#[derive(Serialize)]
pub struct AcceptedBody {
    pub accepted: bool,
    pub state: DeviceState,
}

/// Possible responses from the plain-text override endpoints.
pub enum TurnResponse {
    Accepted(DeviceState),
}

impl IntoResponse for TurnResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted(state) => {
                let message = match state {
                    DeviceState::On => "Turn on request accepted",
                    DeviceState::Off => "Turn off request accepted",
                };
                (StatusCode::ACCEPTED, message).into_response()
            }
        }
    }
}

/// Possible responses from the JSON override endpoint.
pub enum SubmitResponse {
    Accepted(Json<AcceptedBody>),
}

impl IntoResponse for SubmitResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted(json) => (StatusCode::ACCEPTED, json).into_response(),
        }
    }
}

/// `POST /turnOn`
pub async fn turn_on(State(state): State<AppState>) -> Result<TurnResponse, ApiError> {
    state.overrides.request(DeviceState::On)?;
    Ok(TurnResponse::Accepted(DeviceState::On))
}

/// `POST /turnOff`
pub async fn turn_off(State(state): State<AppState>) -> Result<TurnResponse, ApiError> {
    state.overrides.request(DeviceState::Off)?;
    Ok(TurnResponse::Accepted(DeviceState::Off))
}

/// `POST /api/override`
pub async fn submit(
    State(state): State<AppState>,
    Json(req): Json<OverrideRequestBody>,
) -> Result<SubmitResponse, ApiError> {
    state.overrides.request(req.state)?;
    Ok(SubmitResponse::Accepted(Json(AcceptedBody {
        accepted: true,
        state: req.state,
    })))
}
