use std::fmt;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::target::TargetTime;

const MS_PER_SECOND: i64 = 1000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Time left until the next occurrence of the target, split for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainingDuration {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl RemainingDuration {
    pub const ZERO: Self = Self {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn total_secs(&self) -> u64 {
        self.hours as u64 * 3600 + self.minutes as u64 * 60 + self.seconds as u64
    }

    /// Split a millisecond difference with floor division.
    ///
    /// Hours are taken modulo one day.
    fn from_millis(ms: i64) -> Self {
        let ms = ms.max(0);
        Self {
            hours: ((ms % MS_PER_DAY) / MS_PER_HOUR) as u32,
            minutes: ((ms % MS_PER_HOUR) / MS_PER_MINUTE) as u32,
            seconds: ((ms % MS_PER_MINUTE) / MS_PER_SECOND) as u32,
        }
    }
}

impl fmt::Display for RemainingDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// The instant the countdown is currently running towards.
///
/// Today at the target time, or tomorrow if `now` is already past it.
/// A target equal to `now` stays on today.
pub fn next_occurrence(now: NaiveDateTime, target: TargetTime) -> NaiveDateTime {
    let today = now.date().and_time(target.as_naive_time());
    if now > today {
        today + Duration::days(1)
    } else {
        today
    }
}

/// Remaining time from `now` until the next occurrence of `target`.
///
/// Pure and total: the result is always in `[0, 24h)`.
pub fn compute_remaining(now: NaiveDateTime, target: TargetTime) -> RemainingDuration {
    let diff = next_occurrence(now, target) - now;
    RemainingDuration::from_millis(diff.num_milliseconds())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn target(s: &str) -> TargetTime {
        s.parse().unwrap()
    }

    #[test]
    fn target_later_today() {
        let r = compute_remaining(at(9, 0, 0), target("18:00"));
        assert_eq!(
            r,
            RemainingDuration {
                hours: 9,
                minutes: 0,
                seconds: 0
            }
        );
        assert_eq!(next_occurrence(at(9, 0, 0), target("18:00")), at(18, 0, 0));
    }

    #[test]
    fn target_equal_to_now_is_zero() {
        let r = compute_remaining(at(18, 0, 0), target("18:00"));
        assert!(r.is_zero());
    }

    #[test]
    fn target_passed_rolls_to_tomorrow() {
        let now = at(19, 0, 0);
        let r = compute_remaining(now, target("18:00"));
        assert_eq!(
            r,
            RemainingDuration {
                hours: 23,
                minutes: 0,
                seconds: 0
            }
        );
        let next = next_occurrence(now, target("18:00"));
        assert_eq!(next.date(), NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
    }

    #[test]
    fn sub_second_remainder_floors_to_zero() {
        let now = at(17, 59, 59) + Duration::milliseconds(500);
        assert!(compute_remaining(now, target("18:00")).is_zero());
    }

    #[test]
    fn just_past_target_waits_almost_a_day() {
        let now = at(18, 0, 0) + Duration::milliseconds(1);
        let r = compute_remaining(now, target("18:00"));
        assert_eq!(r.to_string(), "23:59:59");
    }

    #[test]
    fn rollover_crosses_month_end() {
        let now = NaiveDate::from_ymd_opt(2026, 12, 31)
            .unwrap()
            .and_hms_opt(23, 30, 0)
            .unwrap();
        let next = next_occurrence(now, target("00:15"));
        assert_eq!(next.date(), NaiveDate::from_ymd_opt(2027, 1, 1).unwrap());
        assert_eq!(compute_remaining(now, target("00:15")).to_string(), "00:45:00");
    }

    #[test]
    fn display_is_zero_padded() {
        let r = RemainingDuration {
            hours: 1,
            minutes: 2,
            seconds: 3,
        };
        assert_eq!(r.to_string(), "01:02:03");
        assert_eq!(r.total_secs(), 3723);
    }

    proptest! {
        #[test]
        fn always_within_one_day(ms in 0i64..MS_PER_DAY, h in 0u8..24, m in 0u8..60) {
            let now = at(0, 0, 0) + Duration::milliseconds(ms);
            let t = TargetTime::new(h, m).unwrap();
            let r = compute_remaining(now, t);
            prop_assert!(r.hours < 24 && r.minutes < 60 && r.seconds < 60);
            prop_assert!(r.total_secs() < 24 * 3600);
        }

        #[test]
        fn is_a_pure_function(ms in 0i64..MS_PER_DAY, h in 0u8..24, m in 0u8..60) {
            let now = at(0, 0, 0) + Duration::milliseconds(ms);
            let t = TargetTime::new(h, m).unwrap();
            prop_assert_eq!(compute_remaining(now, t), compute_remaining(now, t));
        }

        #[test]
        fn next_occurrence_is_never_in_the_past(ms in 0i64..MS_PER_DAY, h in 0u8..24, m in 0u8..60) {
            let now = at(0, 0, 0) + Duration::milliseconds(ms);
            let next = next_occurrence(now, TargetTime::new(h, m).unwrap());
            prop_assert!(next >= now);
            prop_assert!(next - now < Duration::days(1));
        }
    }
}
