//! Wall-clock time of day, without a date component.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Number of minutes in a day.
pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// An hour (0–23) and minute (0–59) on a 24-hour clock.
///
/// Stored as minutes since midnight so comparisons and wraparound
/// arithmetic stay trivial. Serializes as `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    minutes: u16,
}

impl TimeOfDay {
    /// Midnight (`00:00`).
    pub const MIDNIGHT: Self = Self { minutes: 0 };

    /// Build a time of day from an hour and a minute.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::HourOutOfRange`] or
    /// [`ValidationError::MinuteOutOfRange`] when a component is outside
    /// its range.
    pub fn new(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        if hour > 23 {
            return Err(ValidationError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(ValidationError::MinuteOutOfRange(minute));
        }
        #[allow(clippy::cast_possible_truncation)]
        let minutes = (hour * 60 + minute) as u16;
        Ok(Self { minutes })
    }

    /// Build a time of day from a (possibly negative or overflowing) minute
    /// offset, wrapping it onto a single day.
    #[must_use]
    pub(crate) fn from_wrapped_minutes(minutes: i32) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let minutes = minutes.rem_euclid(MINUTES_PER_DAY) as u16;
        Self { minutes }
    }

    /// Hour component (0–23).
    #[must_use]
    pub fn hour(self) -> u32 {
        u32::from(self.minutes / 60)
    }

    /// Minute component (0–59).
    #[must_use]
    pub fn minute(self) -> u32 {
        u32::from(self.minutes % 60)
    }

    /// Minutes elapsed since midnight.
    #[must_use]
    pub fn minutes_since_midnight(self) -> i32 {
        i32::from(self.minutes)
    }

    /// The same instant as a [`NaiveTime`] with zero seconds.
    #[must_use]
    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::MIN + chrono::Duration::minutes(i64::from(self.minutes))
    }
}

impl From<NaiveTime> for TimeOfDay {
    /// Truncates seconds and sub-seconds.
    fn from(time: NaiveTime) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let minutes = (time.hour() * 60 + time.minute()) as u16;
        Self { minutes }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    /// Accepts `"HH:MM"` (24-hour) or `"h:MMam"` / `"h:MMpm"` (12-hour).
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidTimeFormat(input.to_string());
        let normalized = input.trim().to_ascii_lowercase();

        let (clock, meridiem) = if let Some(rest) = normalized.strip_suffix("am") {
            (rest.trim_end(), Some(false))
        } else if let Some(rest) = normalized.strip_suffix("pm") {
            (rest.trim_end(), Some(true))
        } else {
            (normalized.as_str(), None)
        };

        let (hour, minute) = clock.split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if hour.is_empty() || minute.len() != 2 || !digits(hour) || !digits(minute) {
            return Err(invalid());
        }
        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;

        let hour = match meridiem {
            None => hour,
            Some(_) if hour == 0 || hour > 12 => return Err(invalid()),
            Some(false) => hour % 12,
            Some(true) => hour % 12 + 12,
        };

        Self::new(hour, minute)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}
