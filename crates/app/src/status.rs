//! Read-only status snapshots published by the schedule loop.

use tokio::sync::watch;

use nightlight_domain::device::DeviceState;
use nightlight_domain::time::TimeOfDay;
use nightlight_domain::window::NightWindow;

/// What the schedule loop last did and what it will do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleStatus {
    /// Active night window.
    pub window: NightWindow,
    /// State commanded while it is night (the day state is its opposite).
    pub night_state: DeviceState,
    /// Last successfully applied state, `None` until the first success.
    pub commanded: Option<DeviceState>,
    /// Whether it was night at the last evaluation.
    pub is_night: bool,
    /// Next scheduled transition, `None` before the first one is planned.
    pub next_transition: Option<TimeOfDay>,
    /// Message of the most recent apply failure, cleared on success.
    pub last_error: Option<String>,
}

/// Observer handle on the loop's status. Cheap to clone.
#[derive(Debug, Clone)]
pub struct StatusWatcher {
    receiver: watch::Receiver<ScheduleStatus>,
}

impl StatusWatcher {
    pub(crate) fn new(receiver: watch::Receiver<ScheduleStatus>) -> Self {
        Self { receiver }
    }

    /// The latest published snapshot.
    #[must_use]
    pub fn current(&self) -> ScheduleStatus {
        self.receiver.borrow().clone()
    }

    /// Wait until a published snapshot satisfies `predicate`.
    ///
    /// Returns `None` if the loop stops before that happens.
    pub async fn wait_for(
        &mut self,
        predicate: impl FnMut(&ScheduleStatus) -> bool,
    ) -> Option<ScheduleStatus> {
        self.receiver
            .wait_for(predicate)
            .await
            .ok()
            .map(|status| (*status).clone())
    }
}
