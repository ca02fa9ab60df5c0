//! Pure functions deciding whether it is night and when that answer will
//! next change.
//!
//! Both functions project the window onto a 48-hour timeline around `now`:
//! for an overnight window the end is pushed to the next day when `now` is
//! already past the start, otherwise the start is pulled back to the
//! previous day (`now` is in the early-morning tail of last night).
//!
//! Boundaries are start-inclusive and end-exclusive: at exactly `start` it
//! is night, at exactly `end` it is day.

use std::time::Duration;

use chrono::NaiveTime;

use crate::time::{MINUTES_PER_DAY, TimeOfDay};
use crate::window::NightWindow;

/// Window boundaries in minutes, relative to the day `now` lives on.
fn project(now: i32, window: &NightWindow) -> (i32, i32) {
    let mut start = window.start().minutes_since_midnight();
    let mut end = window.end().minutes_since_midnight();
    if end < start {
        if now >= start {
            end += MINUTES_PER_DAY;
        } else {
            start -= MINUTES_PER_DAY;
        }
    }
    (start, end)
}

/// Whether `now` falls inside the night window.
#[must_use]
pub fn is_night(now: TimeOfDay, window: &NightWindow) -> bool {
    let now = now.minutes_since_midnight();
    let (start, end) = project(now, window);
    start <= now && now < end
}

/// The next time of day, strictly after `now` and at most 24 hours away, at
/// which [`is_night`] flips.
#[must_use]
pub fn next_transition(now: TimeOfDay, window: &NightWindow) -> TimeOfDay {
    let now = now.minutes_since_midnight();
    let (start, end) = project(now, window);
    let next = if now < start {
        start
    } else if now < end {
        end
    } else {
        start + MINUTES_PER_DAY
    };
    TimeOfDay::from_wrapped_minutes(next)
}

/// Forward duration from a wall-clock reading to the next occurrence of
/// `target`, always in `(0, 24h]`.
///
/// `now` keeps its seconds so the sleep ends on the minute boundary.
#[must_use]
pub fn wait_until(now: NaiveTime, target: TimeOfDay) -> Duration {
    let day = chrono::Duration::days(1);
    let mut delta = target.to_naive_time().signed_duration_since(now);
    if delta <= chrono::Duration::zero() {
        delta += day;
    }
    delta.to_std().unwrap_or(Duration::from_secs(86_400))
}
