//! The daily range during which the device is in its night state.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::TimeOfDay;

/// A daily time range, possibly crossing midnight.
///
/// Overnight windows (`end` earlier than `start`, e.g. 22:00 → 05:30) are
/// the common case. A window whose start equals its end is rejected since
/// it would never produce a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNightWindow")]
pub struct NightWindow {
    start: TimeOfDay,
    end: TimeOfDay,
}

#[derive(Deserialize)]
struct RawNightWindow {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TryFrom<RawNightWindow> for NightWindow {
    type Error = ValidationError;

    fn try_from(raw: RawNightWindow) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl NightWindow {
    /// Build a window from its boundaries.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyWindow`] when `start == end`.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, ValidationError> {
        if start == end {
            return Err(ValidationError::EmptyWindow(start.to_string()));
        }
        Ok(Self { start, end })
    }

    /// First minute of the night (inclusive).
    #[must_use]
    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    /// First minute of the day (the night excludes it).
    #[must_use]
    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Whether the window crosses midnight.
    #[must_use]
    pub fn is_overnight(&self) -> bool {
        self.end < self.start
    }
}

impl Default for NightWindow {
    /// 22:00 → 05:30.
    fn default() -> Self {
        Self {
            start: TimeOfDay::from_wrapped_minutes(22 * 60),
            end: TimeOfDay::from_wrapped_minutes(5 * 60 + 30),
        }
    }
}

impl std::fmt::Display for NightWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(hour: u32, minute: u32) -> TimeOfDay {
        TimeOfDay::new(hour, minute).unwrap()
    }

    #[test]
    fn should_default_to_ten_pm_until_half_past_five() {
        let window = NightWindow::default();
        assert_eq!(window.start(), t(22, 0));
        assert_eq!(window.end(), t(5, 30));
        assert!(window.is_overnight());
    }

    #[test]
    fn should_accept_same_day_window() {
        let window = NightWindow::new(t(8, 0), t(20, 0)).unwrap();
        assert!(!window.is_overnight());
    }

    #[test]
    fn should_reject_empty_window() {
        assert_eq!(
            NightWindow::new(t(22, 0), t(22, 0)),
            Err(ValidationError::EmptyWindow("22:00".to_string()))
        );
    }

    #[test]
    fn should_display_as_range() {
        assert_eq!(NightWindow::default().to_string(), "22:00..05:30");
    }

    #[test]
    fn should_deserialize_and_validate() {
        let window: NightWindow =
            serde_json::from_str(r#"{"start":"10:00pm","end":"05:30"}"#).unwrap();
        assert_eq!(window, NightWindow::default());

        let empty = serde_json::from_str::<NightWindow>(r#"{"start":"01:00","end":"01:00"}"#);
        assert!(empty.is_err());
    }
}
