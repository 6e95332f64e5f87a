//! Injectable wall clock.
//!
//! Reservation expiry, order-state advancement, and return eligibility all
//! compare against "now". Routing those reads through [`Clock`] lets tests
//! simulate elapsed time instead of sleeping.

use std::{
    fmt::Debug,
    sync::{Arc, Mutex},
};

use jiff::{SignedDuration, Timestamp};

/// Source of the current instant.
pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Production clock reading the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Settable clock for deterministic tests.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Timestamp>>,
}

impl ManualClock {
    #[must_use]
    pub fn starting_at(now: Timestamp) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: SignedDuration) {
        if let Ok(mut now) = self.now.lock() {
            *now = now.saturating_add(by).unwrap();
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.lock().map(|now| *now).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::starting_at(Timestamp::UNIX_EPOCH);

        clock.advance(SignedDuration::from_secs(90));

        assert_eq!(
            clock.now(),
            Timestamp::UNIX_EPOCH.saturating_add(SignedDuration::from_secs(90)).unwrap(),
            "clock should reflect the advanced instant"
        );
    }
}
