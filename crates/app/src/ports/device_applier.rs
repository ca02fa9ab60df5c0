//! Device applier port: the capability to switch a device on or off.

use std::future::Future;

use nightlight_domain::device::DeviceState;
use nightlight_domain::error::ApplyError;

/// Realises a commanded [`DeviceState`] on a physical (or simulated) device.
///
/// Implementations live in adapter crates (e.g. `nightlight-adapter-virtual`,
/// `nightlight-adapter-hue`). The schedule loop never issues two calls concurrently,
/// but it does call again with an unchanged state, so applying must be
/// idempotent. Timeouts and retries are the implementation's concern.
pub trait DeviceApplier: Send + Sync {
    /// Switch the device to `state`.
    fn apply_state(
        &self,
        state: DeviceState,
    ) -> impl Future<Output = Result<(), ApplyError>> + Send;
}

impl<T: DeviceApplier> DeviceApplier for std::sync::Arc<T> {
    fn apply_state(
        &self,
        state: DeviceState,
    ) -> impl Future<Output = Result<(), ApplyError>> + Send {
        (**self).apply_state(state)
    }
}
