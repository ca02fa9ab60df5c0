//! Schedule loop: drives the device from the night window and manual overrides.
//!
//! The loop is a single long-lived task. On startup it forces the device
//! [`Off`](DeviceState::Off) as a known baseline, then applies whatever the
//! night window says. It then sleeps until the next window boundary while
//! also listening for override requests:
//!
//! - an override is applied immediately and the pending sleep keeps running;
//! - when the sleep ends the loop re-reads the clock, re-derives the state
//!   with [`is_night`] and applies it, which may undo a conflicting override.
//!
//! Once the boundary has passed, the scheduled apply runs before any
//! override still waiting in the queue, even if the timer has not been
//! polled as fired yet. Such an override is applied right after it.
//!
//! Device calls are awaited one at a time, so scheduled and manual
//! transitions never reach the device concurrently. A failed call is logged
//! and recorded in the status; the loop carries on and does not retry.

use std::fmt;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use nightlight_domain::device::DeviceState;
use nightlight_domain::error::ApplyError;
use nightlight_domain::override_request::OverrideRequest;
use nightlight_domain::time::TimeOfDay;
use nightlight_domain::window::NightWindow;
use nightlight_domain::window_policy::{is_night, next_transition, wait_until};

use crate::override_queue::OverrideReceiver;
use crate::ports::{Clock, DeviceApplier};
use crate::status::{ScheduleStatus, StatusWatcher};

/// Why the loop is applying a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyReason {
    /// Forced baseline at startup.
    Baseline,
    /// Derived from the night window.
    Scheduled,
    /// Requested by an override producer.
    Override,
}

impl fmt::Display for ApplyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Baseline => f.write_str("baseline"),
            Self::Scheduled => f.write_str("scheduled"),
            Self::Override => f.write_str("override"),
        }
    }
}

/// Live scheduling state, owned exclusively by the loop.
pub struct ScheduleContext<D> {
    window: NightWindow,
    night_state: DeviceState,
    commanded: Option<DeviceState>,
    applier: D,
}

impl<D: DeviceApplier> ScheduleContext<D> {
    /// Create a context that commands `night_state` during `window` and its
    /// opposite the rest of the day.
    pub fn new(window: NightWindow, night_state: DeviceState, applier: D) -> Self {
        Self {
            window,
            night_state,
            commanded: None,
            applier,
        }
    }

    /// Active night window.
    #[must_use]
    pub fn window(&self) -> &NightWindow {
        &self.window
    }

    /// Last successfully applied state.
    #[must_use]
    pub fn commanded(&self) -> Option<DeviceState> {
        self.commanded
    }

    /// State the device should be in at `now` according to the window.
    #[must_use]
    pub fn scheduled_state(&self, now: TimeOfDay) -> DeviceState {
        if is_night(now, &self.window) {
            self.night_state
        } else {
            self.night_state.opposite()
        }
    }

    /// Ask the device for `state`; the commanded state only moves on success.
    async fn apply(&mut self, state: DeviceState) -> Result<(), ApplyError> {
        self.applier.apply_state(state).await?;
        self.commanded = Some(state);
        Ok(())
    }
}

/// The scheduling task. Build with [`ScheduleLoop::new`], then [`run`](Self::run)
/// or [`spawn`](Self::spawn) it.
pub struct ScheduleLoop<D, C> {
    context: ScheduleContext<D>,
    clock: C,
    overrides: Option<OverrideReceiver>,
    next_transition: Option<TimeOfDay>,
    last_error: Option<String>,
    status: watch::Sender<ScheduleStatus>,
}

impl<D, C> ScheduleLoop<D, C>
where
    D: DeviceApplier,
    C: Clock,
{
    /// Create the loop and a watcher for its status snapshots.
    pub fn new(
        context: ScheduleContext<D>,
        clock: C,
        overrides: OverrideReceiver,
    ) -> (Self, StatusWatcher) {
        let initial = ScheduleStatus {
            window: context.window,
            night_state: context.night_state,
            commanded: None,
            is_night: is_night(TimeOfDay::from(clock.now()), &context.window),
            next_transition: None,
            last_error: None,
        };
        let (status, receiver) = watch::channel(initial);
        let this = Self {
            context,
            clock,
            overrides: Some(overrides),
            next_transition: None,
            last_error: None,
            status,
        };
        (this, StatusWatcher::new(receiver))
    }

    /// Run on a new tokio task.
    pub fn spawn(self) -> JoinHandle<()>
    where
        D: 'static,
        C: 'static,
    {
        tokio::spawn(self.run())
    }

    /// Run forever: baseline, then scheduled transitions interleaved with
    /// overrides.
    pub async fn run(mut self) {
        tracing::info!(
            window = %self.context.window,
            night_state = %self.context.night_state,
            "schedule loop starting"
        );
        self.apply(DeviceState::Off, ApplyReason::Baseline).await;
        self.apply_scheduled().await;

        loop {
            let now = self.clock.now();
            let next = next_transition(TimeOfDay::from(now), &self.context.window);
            let wait = wait_until(now, next);
            self.next_transition = Some(next);
            self.publish();
            tracing::info!(%next, wait_secs = wait.as_secs(), "next transition scheduled");

            let deadline = Instant::now() + wait;
            let timer = tokio::time::sleep_until(deadline);
            tokio::pin!(timer);

            let mut deferred = None;
            loop {
                if Instant::now() >= deadline {
                    break;
                }
                tokio::select! {
                    biased;
                    () = &mut timer => break,
                    request = next_override(&mut self.overrides) => match request {
                        Some(request) if Instant::now() >= deadline => {
                            deferred = Some(request);
                            break;
                        }
                        Some(request) => self.apply_override(request).await,
                        None => {
                            tracing::warn!("override queue closed, continuing with schedule only");
                            self.overrides = None;
                        }
                    },
                }
            }

            self.apply_scheduled().await;
            if let Some(request) = deferred {
                self.apply_override(request).await;
            }
        }
    }

    async fn apply_scheduled(&mut self) {
        let now = TimeOfDay::from(self.clock.now());
        let state = self.context.scheduled_state(now);
        tracing::debug!(%now, night = is_night(now, &self.context.window), %state, "evaluated night window");
        self.apply(state, ApplyReason::Scheduled).await;
    }

    async fn apply_override(&mut self, request: OverrideRequest) {
        tracing::info!(state = %request.desired, "manual override received");
        self.apply(request.desired, ApplyReason::Override).await;
    }

    async fn apply(&mut self, state: DeviceState, reason: ApplyReason) {
        match self.context.apply(state).await {
            Ok(()) => {
                tracing::info!(%state, %reason, "device state applied");
                self.last_error = None;
            }
            Err(err) => {
                let message = describe(&err);
                tracing::warn!(%state, %reason, error = %message, "failed to apply device state");
                self.last_error = Some(message);
            }
        }
        self.publish();
    }

    fn publish(&self) {
        let now = TimeOfDay::from(self.clock.now());
        self.status.send_replace(ScheduleStatus {
            window: self.context.window,
            night_state: self.context.night_state,
            commanded: self.context.commanded(),
            is_night: is_night(now, &self.context.window),
            next_transition: self.next_transition,
            last_error: self.last_error.clone(),
        });
    }
}

/// Next override, or never once the queue is closed.
async fn next_override(overrides: &mut Option<OverrideReceiver>) -> Option<OverrideRequest> {
    match overrides {
        Some(receiver) => receiver.recv().await,
        None => std::future::pending().await,
    }
}

/// Error message including its chain of sources.
fn describe(err: &ApplyError) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    message
}
