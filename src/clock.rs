//! Wall-clock access for the control loop.

use chrono::{Local, Timelike};

use crate::{Result, TimeOfDay};

/// One sample of the wall clock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockReading {
    /// Current minute of the day
    pub time: TimeOfDay,
    /// Human readable time (`HH:MM`) for log lines
    pub display: String,
}

impl ClockReading {
    pub fn new(time: TimeOfDay) -> Self {
        Self {
            time,
            display: format!("{:02}:{:02}", time.hour(), time.minute()),
        }
    }
}

/// Source of the current time of day
pub trait Clock {
    fn now(&mut self) -> Result<ClockReading>;
}

/// Local time of the host, as kept by the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&mut self) -> Result<ClockReading> {
        let now = Local::now();
        let time = TimeOfDay::from_hm(now.hour(), now.minute())?;
        Ok(ClockReading {
            time,
            display: now.format("%H:%M").to_string(),
        })
    }
}
