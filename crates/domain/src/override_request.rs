//! A one-shot manual command to force the device state.

use serde::{Deserialize, Serialize};

use crate::device::DeviceState;

/// A manual request to force the device into `desired`.
///
/// Overrides are transient: the next scheduled transition re-derives the
/// state from the night window and may undo them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRequest {
    pub desired: DeviceState,
}

impl OverrideRequest {
    /// Create a request for the given state.
    #[must_use]
    pub fn new(desired: DeviceState) -> Self {
        Self { desired }
    }
}

impl From<DeviceState> for OverrideRequest {
    fn from(desired: DeviceState) -> Self {
        Self::new(desired)
    }
}
