/*!
 # Wake/sleep schedule

 This module holds the configured wake and sleep times and decides
 whether a given time of day falls inside the sleep window.
*/

use tracing::debug;

use crate::TimeOfDay;

/// Default wake time (07:30)
pub const DEFAULT_WAKE_TIME: TimeOfDay = TimeOfDay::hhmm(730);
/// Default sleep time (22:45)
pub const DEFAULT_SLEEP_TIME: TimeOfDay = TimeOfDay::hhmm(2245);

/// Wake and sleep times, fixed for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Time the phone starts ringing again
    pub wake: TimeOfDay,
    /// Time the ring gets suppressed
    pub sleep: TimeOfDay,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            wake: DEFAULT_WAKE_TIME,
            sleep: DEFAULT_SLEEP_TIME,
        }
    }
}

impl ScheduleConfig {
    pub fn new(wake: TimeOfDay, sleep: TimeOfDay) -> Self {
        Self { wake, sleep }
    }

    /// Builds a schedule from raw command line values.
    ///
    /// Each value falls back to its own default when missing or invalid.
    pub fn from_args(wake: Option<&str>, sleep: Option<&str>) -> Self {
        Self {
            wake: parse_or_default(wake, DEFAULT_WAKE_TIME, "wake"),
            sleep: parse_or_default(sleep, DEFAULT_SLEEP_TIME, "sleep"),
        }
    }

    /// Whether `now` is inside this schedule's sleep window
    pub fn is_sleep_time(&self, now: TimeOfDay) -> bool {
        in_sleep_window(now, self.wake, self.sleep)
    }
}

fn parse_or_default(arg: Option<&str>, default: TimeOfDay, what: &str) -> TimeOfDay {
    let Some(arg) = arg else {
        return default;
    };
    TimeOfDay::parse_arg(arg).unwrap_or_else(|| {
        debug!("Ignoring invalid {} time {:?}, using {}", what, arg, default);
        default
    })
}

/// Whether `now` falls inside the sleep window.
///
/// With `wake < sleep` the awake window `[wake, sleep)` is the
/// non-wrapping interval and everything else is sleep. Otherwise the sleep
/// window `[sleep, wake)` is the non-wrapping one, so `wake == sleep`
/// never sleeps.
pub fn in_sleep_window(now: TimeOfDay, wake: TimeOfDay, sleep: TimeOfDay) -> bool {
    if wake < sleep {
        !(wake <= now && now < sleep)
    } else {
        sleep <= now && now < wake
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(hhmm: u32) -> TimeOfDay {
        TimeOfDay::new(hhmm).unwrap()
    }

    fn all_times() -> impl Iterator<Item = TimeOfDay> {
        (0..24).flat_map(|h| (0..60).map(move |m| TimeOfDay::from_hm(h, m).unwrap()))
    }

    #[test]
    fn day_window_sleeps_outside_wake_to_sleep() {
        let (wake, sleep) = (t(730), t(2245));
        for now in all_times() {
            let awake = now >= wake && now < sleep;
            assert_eq!(in_sleep_window(now, wake, sleep), !awake, "at {now}");
        }
    }

    #[test]
    fn wrapping_window_sleeps_between_sleep_and_wake() {
        let (wake, sleep) = (t(1400), t(130));
        for now in all_times() {
            let asleep = now >= sleep && now < wake;
            assert_eq!(in_sleep_window(now, wake, sleep), asleep, "at {now}");
        }
    }

    #[test]
    fn window_edges() {
        let (wake, sleep) = (t(730), t(2245));
        assert!(in_sleep_window(t(729), wake, sleep));
        assert!(!in_sleep_window(t(730), wake, sleep));
        assert!(!in_sleep_window(t(2244), wake, sleep));
        assert!(in_sleep_window(t(2245), wake, sleep));
        assert!(in_sleep_window(t(0), wake, sleep));
    }

    #[test]
    fn equal_times_never_sleep() {
        let same = t(600);
        assert!(all_times().all(|now| !in_sleep_window(now, same, same)));
    }

    #[test]
    fn defaults_apply_per_argument() {
        assert_eq!(ScheduleConfig::from_args(None, None), ScheduleConfig::default());

        let schedule = ScheduleConfig::from_args(Some("715"), Some("bogus"));
        assert_eq!(schedule.wake, t(715));
        assert_eq!(schedule.sleep, DEFAULT_SLEEP_TIME);

        let schedule = ScheduleConfig::from_args(Some("2460"), Some("-2300"));
        assert_eq!(schedule.wake, DEFAULT_WAKE_TIME);
        assert_eq!(schedule.sleep, t(2300));
    }

    #[test]
    fn default_times() {
        assert_eq!(DEFAULT_WAKE_TIME.value(), 730);
        assert_eq!(DEFAULT_SLEEP_TIME.value(), 2245);
    }
}
