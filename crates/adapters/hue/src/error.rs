//! Hue adapter error types.

use nightlight_domain::error::ApplyError;

/// Errors specific to the Hue adapter.
#[derive(Debug, thiserror::Error)]
pub enum HueError {
    /// The HTTP request to the bridge failed (connection, timeout, status, body).
    #[error("hue bridge request failed")]
    Http(#[from] reqwest::Error),

    /// The bridge answered with an error object.
    #[error("hue bridge error {kind}: {description}")]
    Bridge {
        /// Hue API error type code (e.g. 1 for "unauthorized user").
        kind: u32,
        /// Human readable description sent by the bridge.
        description: String,
    },

    /// A configured light name does not exist on the bridge.
    #[error("light {0:?} not found on the hue bridge")]
    LightNotFound(String),

    /// The bridge answered with a payload we do not understand.
    #[error("unexpected response from hue bridge")]
    UnexpectedResponse,

    /// Some lights could not be switched.
    #[error("{failed} of {total} hue lights failed to switch")]
    PartialFailure {
        /// Number of lights that failed.
        failed: usize,
        /// Number of lights attempted.
        total: usize,
    },
}

impl From<HueError> for ApplyError {
    fn from(err: HueError) -> Self {
        ApplyError::new(err)
    }
}
