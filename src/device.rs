/*!
 # Digital I/O for the button and the ring suppressor

 The control loop only sees the [`ButtonInput`] and [`SuppressorOutput`]
 traits. On a Raspberry Pi they are backed by `rppal` pins addressed by
 their BCM number.
*/

use rppal::gpio::{Gpio, InputPin, Level, OutputPin};
use tracing::{debug, info, instrument};

use crate::{Error, Result};

/// BCM pin of the override button in the reference wiring
pub const DEFAULT_BUTTON_PIN: u8 = 23;
/// BCM pin of the ring-suppressor enable line in the reference wiring
pub const DEFAULT_SUPPRESSOR_PIN: u8 = 18;

/// Manual override button
pub trait ButtonInput {
    /// Whether the button is currently held down
    fn is_pressed(&mut self) -> Result<bool>;
}

/// Ring-suppressor enable line
pub trait SuppressorOutput {
    /// Drives the line; `true` suppresses the ring
    fn write(&mut self, active: bool) -> Result<()>;
}

/// Button wired between the pin and ground, read through the internal pull-up
#[derive(Debug)]
pub struct RpiButton {
    pin: InputPin,
}

impl RpiButton {
    pub fn pin(&self) -> u8 {
        self.pin.pin()
    }
}

impl ButtonInput for RpiButton {
    fn is_pressed(&mut self) -> Result<bool> {
        // Pulled up: released reads high, pressed reads low
        Ok(self.pin.read() == Level::Low)
    }
}

/// Ring-suppressor line, active high.
///
/// Dropping the handle drives the line low (ring allowed) and leaves the pin
/// configured as an output, so it never floats after the process lets go.
#[derive(Debug)]
pub struct RpiSuppressor {
    pin: OutputPin,
}

impl RpiSuppressor {
    pub fn pin(&self) -> u8 {
        self.pin.pin()
    }
}

impl SuppressorOutput for RpiSuppressor {
    fn write(&mut self, active: bool) -> Result<()> {
        self.pin.write(Level::from(active));
        Ok(())
    }
}

impl Drop for RpiSuppressor {
    fn drop(&mut self) {
        debug!("Releasing suppressor pin {}", self.pin.pin());
        self.pin.set_low();
    }
}

/// Acquires the button and suppressor pins.
///
/// The button gets its pull-up enabled; the suppressor starts low.
#[instrument]
pub fn acquire(button_pin: u8, suppressor_pin: u8) -> Result<(RpiButton, RpiSuppressor)> {
    if button_pin == suppressor_pin {
        return Err(Error::PinConflict(button_pin));
    }

    let gpio = Gpio::new()?;

    let button = gpio
        .get(button_pin)
        .map_err(|source| Error::PinUnavailable {
            pin: button_pin,
            source,
        })?
        .into_input_pullup();

    let mut suppressor = gpio
        .get(suppressor_pin)
        .map_err(|source| Error::PinUnavailable {
            pin: suppressor_pin,
            source,
        })?
        .into_output_low();
    suppressor.set_reset_on_drop(false);

    info!(
        "GPIO ready: button on BCM {}, suppressor on BCM {}",
        button_pin, suppressor_pin
    );
    Ok((RpiButton { pin: button }, RpiSuppressor { pin: suppressor }))
}
