//! Bounded channel carrying manual override requests to the loop.
//!
//! Producers never block: a request arriving while the queue is full is
//! dropped and reported as [`OverrideError::QueueFull`]. Requests that make
//! it into the queue are delivered to the loop in FIFO order.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use nightlight_domain::device::DeviceState;
use nightlight_domain::override_request::OverrideRequest;

/// Default number of requests buffered ahead of the loop.
pub const DEFAULT_CAPACITY: usize = 2;

/// Why an override request was not queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OverrideError {
    /// Too many requests are already waiting; this one was dropped.
    #[error("override queue is full, request dropped")]
    QueueFull,

    /// The schedule loop has stopped and no longer consumes requests.
    #[error("schedule loop is not running")]
    LoopStopped,
}

/// Create a connected sender/receiver pair holding at most `capacity`
/// pending requests (at least one).
#[must_use]
pub fn channel(capacity: usize) -> (OverrideSender, OverrideReceiver) {
    let (sender, receiver) = mpsc::channel(capacity.max(1));
    (OverrideSender { sender }, OverrideReceiver { receiver })
}

/// Producer side. Cheap to clone and safe to use from many tasks at once.
#[derive(Debug, Clone)]
pub struct OverrideSender {
    sender: mpsc::Sender<OverrideRequest>,
}

impl OverrideSender {
    /// Queue a request to force the device into `desired`.
    ///
    /// Acceptance only means the loop will see the request; whether the
    /// device call later succeeds is reported by the loop, not here.
    ///
    /// # Errors
    ///
    /// Returns [`OverrideError::QueueFull`] when the queue is at capacity and
    /// [`OverrideError::LoopStopped`] when the loop is gone.
    pub fn request(&self, desired: DeviceState) -> Result<(), OverrideError> {
        match self.sender.try_send(OverrideRequest::new(desired)) {
            Ok(()) => {
                tracing::debug!(state = %desired, "override request queued");
                Ok(())
            }
            Err(TrySendError::Full(request)) => {
                tracing::warn!(state = %request.desired, "override queue full, dropping request");
                Err(OverrideError::QueueFull)
            }
            Err(TrySendError::Closed(request)) => {
                tracing::warn!(state = %request.desired, "schedule loop stopped, dropping override request");
                Err(OverrideError::LoopStopped)
            }
        }
    }
}

/// Consumer side, owned by the schedule loop.
#[derive(Debug)]
pub struct OverrideReceiver {
    receiver: mpsc::Receiver<OverrideRequest>,
}

impl OverrideReceiver {
    /// Wait for the next request. Returns `None` once every sender is gone
    /// and the queue is drained.
    pub async fn recv(&mut self) -> Option<OverrideRequest> {
        self.receiver.recv().await
    }
}
