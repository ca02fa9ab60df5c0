//! Clock port.

use chrono::NaiveTime;

/// Source of the current local wall-clock time.
///
/// All times handed to the window policy must come from one reference
/// timezone; the clock is where that normalisation happens.
pub trait Clock: Send + Sync {
    /// Current time of day, with sub-minute precision.
    fn now(&self) -> NaiveTime;
}

/// Reads the host's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveTime {
        chrono::Local::now().time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_current_local_time() {
        let before = chrono::Local::now().time();
        let now = SystemClock.now();
        let after = chrono::Local::now().time();
        // Tolerate the test running across midnight.
        assert!((before <= now && now <= after) || after < before);
    }
}
