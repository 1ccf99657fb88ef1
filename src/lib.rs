/*!
 # Telephone Ring Suppressor Controller

 A small daemon for a Raspberry Pi that silences an analog telephone's ring
 outside configured awake hours. One GPIO input reads a manual override
 button, one GPIO output drives the ring-suppressor enable line.

 ## Features

 * Wake/sleep schedule in `HHMM` time-of-day form, wrapping midnight
 * Debounced override button that toggles sleep/wake
 * Resynchronization after clock jumps (NTP correction, manual set)
 * Output driven low (ring allowed) on shutdown or drop

 ## Example

 ```no_run
 use phone_sleep::*;

 #[tokio::main(flavor = "current_thread")]
 async fn main() -> Result<()> {
     let schedule = ScheduleConfig::from_args(Some("715"), Some("2245"));
     let (button, suppressor) = device::acquire(23, 18)?;

     let mut control = ControlLoop::new(schedule, SystemClock, button, suppressor)?;
     control.run(std::future::pending::<()>()).await
 }
 ```
*/

use thiserror::Error;

/// Custom error types for the ring suppressor controller
#[derive(Error, Debug)]
pub enum Error {
    /// Not a valid `HHMM` time of day
    #[error("Invalid time of day {0} (expected HHMM between 0000 and 2359)")]
    InvalidTimeOfDay(u32),

    /// Value out of range
    #[error("Value {0} out of range ({1}..{2})")]
    ValueOutOfRange(u32, u32, u32),

    /// Button and suppressor configured on the same pin
    #[error("Button and suppressor cannot share GPIO pin {0}")]
    PinConflict(u8),

    /// GPIO pin could not be acquired
    #[error("Could not acquire GPIO pin {pin}: {source}")]
    PinUnavailable {
        pin: u8,
        #[source]
        source: rppal::gpio::Error,
    },

    /// Error from rppal
    #[error(transparent)]
    Gpio(#[from] rppal::gpio::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod clock;
pub mod control;
pub mod debounce;
pub mod device;
pub mod schedule;
pub mod time_of_day;

// Re-export key types
pub use clock::{Clock, ClockReading, SystemClock};
pub use control::{ControlLoop, DeviceState, Event, POLL_PERIOD};
pub use debounce::{Debouncer, HOLD_DOWN_TICKS};
pub use device::{ButtonInput, RpiButton, RpiSuppressor, SuppressorOutput};
pub use schedule::{in_sleep_window, ScheduleConfig, DEFAULT_SLEEP_TIME, DEFAULT_WAKE_TIME};
pub use time_of_day::TimeOfDay;
