//! Wall-clock sources for the countdown.
//!
//! The engine never reads the time itself; everything that drives it takes
//! a [`Clock`]. Only local wall-clock time is supported.

use std::sync::{Arc, Mutex};

use chrono::{Duration, Local, NaiveDateTime};

use crate::error::ValidationError;

/// Read-only source of the current local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// The host's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<NaiveDateTime>>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn set(&self, to: NaiveDateTime) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = to;
    }

    pub fn advance(&self, by: Duration) {
        let mut guard = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *guard += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Wall-clock time derived from tokio's monotonic clock, anchored at a
/// fixed start time.
///
/// Follows tokio's paused time in tests, so timer-driven scenarios can be
/// replayed against a known wall-clock time.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    anchor: NaiveDateTime,
    started: tokio::time::Instant,
}

impl MonotonicClock {
    pub fn starting_at(anchor: NaiveDateTime) -> Self {
        Self {
            anchor,
            started: tokio::time::Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> NaiveDateTime {
        let elapsed = self.started.elapsed();
        self.anchor + Duration::from_std(elapsed).unwrap_or_else(|_| Duration::zero())
    }
}

/// Parse a `YYYY-MM-DD HH:MM:SS` local wall-clock time.
pub fn parse_wall_clock(input: &str) -> Result<NaiveDateTime, ValidationError> {
    let trimmed = input.trim();
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S").map_err(|_| {
        ValidationError::InvalidDateTime {
            input: trimmed.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn nine_am() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn manual_clock_is_shared_between_clones() {
        let clock = ManualClock::new(nine_am());
        let other = clock.clone();
        clock.advance(Duration::seconds(90));
        assert_eq!(other.now(), nine_am() + Duration::seconds(90));
        other.set(nine_am());
        assert_eq!(clock.now(), nine_am());
    }

    #[tokio::test(start_paused = true)]
    async fn monotonic_clock_follows_tokio_time() {
        let clock = MonotonicClock::starting_at(nine_am());
        assert_eq!(clock.now(), nine_am());
        tokio::time::advance(std::time::Duration::from_secs(5)).await;
        assert_eq!(clock.now(), nine_am() + Duration::seconds(5));
    }

    #[test]
    fn parses_wall_clock_input() {
        assert_eq!(parse_wall_clock("2026-10-18 09:00:00").unwrap(), nine_am());
        assert!(matches!(
            parse_wall_clock("18:00"),
            Err(ValidationError::InvalidDateTime { .. })
        ));
    }

    #[test]
    fn system_clock_moves_forward() {
        let a = SystemClock.now();
        let b = SystemClock.now();
        assert!(b >= a);
    }
}
