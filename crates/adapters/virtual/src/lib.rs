//! # nightlight-adapter-virtual
//!
//! Virtual/demo device that implements the `DeviceApplier` port without any
//! hardware. Useful for trying the scheduler out and for end-to-end tests.
//!
//! | Behaviour | |
//! |-----------|---|
//! | Initial state | `off` |
//! | `apply_state` | records the state and logs it |
//! | Unavailable | every call fails with [`VirtualError::Unavailable`] |
//!
//! ## Dependency rule
//!
//! Depends on `nightlight-app` (port traits) and `nightlight-domain` only.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use nightlight_app::ports::DeviceApplier;
use nightlight_domain::device::DeviceState;
use nightlight_domain::error::ApplyError;

/// Errors raised by the virtual light.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VirtualError {
    /// The light was switched to unavailable with [`VirtualLight::set_available`].
    #[error("virtual light {0:?} is unavailable")]
    Unavailable(String),
}

impl From<VirtualError> for ApplyError {
    fn from(err: VirtualError) -> Self {
        ApplyError::new(err)
    }
}

#[derive(Debug)]
struct Inner {
    state: DeviceState,
    available: bool,
    history: Vec<DeviceState>,
}

/// A simulated light. Clones share the same underlying light, so a handle
/// can be kept to inspect what the scheduler did.
#[derive(Debug, Clone)]
pub struct VirtualLight {
    name: String,
    inner: Arc<Mutex<Inner>>,
}

impl Default for VirtualLight {
    fn default() -> Self {
        Self::new("Virtual Light")
    }
}

impl VirtualLight {
    /// Create a light that starts off and available.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inner: Arc::new(Mutex::new(Inner {
                state: DeviceState::Off,
                available: true,
                history: Vec::new(),
            })),
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current simulated state.
    #[must_use]
    pub fn state(&self) -> DeviceState {
        self.lock().state
    }

    /// Every state successfully applied so far, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<DeviceState> {
        self.lock().history.clone()
    }

    /// Simulate the light dropping off (or coming back to) the network.
    pub fn set_available(&self, available: bool) {
        self.lock().available = available;
    }

    fn switch(&self, state: DeviceState) -> Result<(), VirtualError> {
        let mut inner = self.lock();
        if !inner.available {
            return Err(VirtualError::Unavailable(self.name.clone()));
        }
        inner.state = state;
        inner.history.push(state);
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DeviceApplier for VirtualLight {
    async fn apply_state(&self, state: DeviceState) -> Result<(), ApplyError> {
        self.switch(state)?;
        tracing::info!(light = %self.name, %state, "virtual light switched");
        Ok(())
    }
}
