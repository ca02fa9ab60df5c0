//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts via `From`.
//! Configuration problems surface as [`ValidationError`] and are fatal at
//! startup; device failures surface as [`ApplyError`] and are recoverable.

/// Invariant violations detected while building domain values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("hour {0} is out of range (expected 0-23)")]
    HourOutOfRange(u32),

    #[error("minute {0} is out of range (expected 0-59)")]
    MinuteOutOfRange(u32),

    #[error("invalid time of day {0:?} (expected HH:MM or h:MMam/pm)")]
    InvalidTimeFormat(String),

    #[error("night window must not start and end at the same time ({0})")]
    EmptyWindow(String),

    #[error("invalid device state {0:?} (expected \"on\" or \"off\")")]
    InvalidDeviceState(String),
}

/// A device driver failed to realise a commanded state.
///
/// The source is boxed so drivers can surface their own error types
/// without the domain knowing about them.
#[derive(Debug, thiserror::Error)]
#[error("failed to apply device state")]
pub struct ApplyError(#[source] Box<dyn std::error::Error + Send + Sync>);

impl ApplyError {
    /// Wrap a driver error.
    pub fn new<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self(Box::new(source))
    }
}
