//! Up/down counter debounce for the override button.
//!
//! The button must read pressed for [`HOLD_DOWN_TICKS`] consecutive polls
//! to register, and must then be fully released (counter back at zero)
//! before it can register again.

/// Consecutive pressed samples needed to register a press
pub const HOLD_DOWN_TICKS: u8 = 3;

/// Button debounce state tracker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Debouncer {
    /// Saturating count of pressed samples, 0..=HOLD_DOWN_TICKS
    hold_down: u8,
    /// Set once a press has registered, cleared on full release
    lock_out: bool,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one sample. Returns `true` exactly once per qualifying press.
    pub fn update(&mut self, pressed: bool) -> bool {
        if pressed {
            if self.hold_down < HOLD_DOWN_TICKS {
                self.hold_down += 1;
            }
        } else {
            self.hold_down = self.hold_down.saturating_sub(1);
            if self.hold_down == 0 {
                self.lock_out = false;
            }
        }

        if self.hold_down == HOLD_DOWN_TICKS && !self.lock_out {
            self.lock_out = true;
            return true;
        }
        false
    }

    pub fn hold_down(&self) -> u8 {
        self.hold_down
    }

    pub fn is_locked_out(&self) -> bool {
        self.lock_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Runs a sequence of samples and counts registered presses
    fn presses(samples: &[bool]) -> usize {
        let mut debouncer = Debouncer::new();
        samples.iter().filter(|&&s| debouncer.update(s)).count()
    }

    #[test]
    fn three_tick_hold_registers_once() {
        assert_eq!(presses(&[true, true, true, false, false, false]), 1);
    }

    #[test]
    fn two_tick_hold_is_ignored() {
        assert_eq!(presses(&[true, true, false, false, false]), 0);
    }

    #[test]
    fn long_hold_registers_once() {
        assert_eq!(presses(&[true; 10]), 1);
    }

    #[test]
    fn registers_on_third_sample() {
        let mut debouncer = Debouncer::new();
        assert!(!debouncer.update(true));
        assert!(!debouncer.update(true));
        assert!(debouncer.update(true));
        assert!(debouncer.is_locked_out());
    }

    #[test]
    fn partial_release_does_not_refire() {
        // 3 -> 2 -> 1 -> back up to 3 without reaching zero
        let samples = [true, true, true, false, false, true, true, true, true];
        assert_eq!(presses(&samples), 1);
    }

    #[test]
    fn full_release_rearms() {
        let samples = [true, true, true, false, false, false, true, true, true];
        assert_eq!(presses(&samples), 2);
    }

    #[test]
    fn counter_saturates_both_ways() {
        let mut debouncer = Debouncer::new();
        debouncer.update(false);
        assert_eq!(debouncer.hold_down(), 0);
        for _ in 0..5 {
            debouncer.update(true);
        }
        assert_eq!(debouncer.hold_down(), HOLD_DOWN_TICKS);
    }

    #[test]
    fn noise_is_filtered() {
        let samples = [true, false, true, false, true, true, false, true];
        assert_eq!(presses(&samples), 0);
    }
}
