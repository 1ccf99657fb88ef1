/*!
 # Time of day in `HHMM` form

 Times are stored as `hour * 100 + minute`, so the value space is not
 contiguous: 60..=99 of every hour never occurs. Differences between two
 values are taken in that encoding, not in minutes.
*/

use std::fmt;

use crate::{Error, Result};

/// Minute of the day encoded as `hour * 100 + minute` (0000..=2359)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Midnight (0000)
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Creates a time of day in const context.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not a valid `HHMM` time; in a const item this
    /// is a compile error.
    pub(crate) const fn hhmm(value: u16) -> Self {
        assert!(value % 100 < 60 && value / 100 < 24, "invalid time of day");
        TimeOfDay(value)
    }

    /// Creates a time of day from an `HHMM` encoded value
    pub fn new(hhmm: u32) -> Result<Self> {
        if Self::is_valid(hhmm) {
            Ok(TimeOfDay(hhmm as u16))
        } else {
            Err(Error::InvalidTimeOfDay(hhmm))
        }
    }

    /// Creates a time of day from hour and minute fields
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self> {
        if hour >= 24 {
            return Err(Error::ValueOutOfRange(hour, 0, 24));
        }
        if minute >= 60 {
            return Err(Error::ValueOutOfRange(minute, 0, 60));
        }
        Ok(TimeOfDay((hour * 100 + minute) as u16))
    }

    /// Whether `hhmm` has a minute part below 60 and an hour part below 24
    pub fn is_valid(hhmm: u32) -> bool {
        hhmm % 100 < 60 && hhmm / 100 < 24
    }

    /// Parses a command line value.
    ///
    /// Surrounding whitespace is ignored and a leading sign is accepted;
    /// the absolute value is then validated. Returns `None` for anything
    /// that is not a valid time of day.
    pub fn parse_arg(arg: &str) -> Option<Self> {
        let value = arg.trim().parse::<i64>().ok()?.unsigned_abs();
        let value = u32::try_from(value).ok()?;
        Self::new(value).ok()
    }

    /// The raw `HHMM` value
    pub fn value(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 100
    }

    pub fn minute(self) -> u16 {
        self.0 % 100
    }

    /// Absolute difference of the encoded values.
    ///
    /// A normal one-minute step gives 1, an hour boundary 41 (e.g. 0959 to
    /// 1000) and the midnight wrap 2359.
    pub fn encoded_delta(self, other: TimeOfDay) -> u16 {
        self.0.abs_diff(other.0)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

impl TryFrom<u32> for TimeOfDay {
    type Error = Error;

    fn try_from(hhmm: u32) -> Result<Self> {
        Self::new(hhmm)
    }
}
