//! IR presence sensor on a plain digital input.
//!
//! The module drives its output LOW while something is in front of it.
//! The pin is configured as an input without pulls; the adapter only
//! reports the electrical level and leaves the active-level convention
//! to [`SensorPoller`](super::SensorPoller).

use embedded_hal::digital::InputPin;

use crate::app::ports::SensorPort;
use crate::error::SensorError;

/// [`SensorPort`] backed by any `embedded-hal` input pin.
pub struct IrSensor<P> {
    pin: P,
}

impl<P: InputPin> IrSensor<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> SensorPort for IrSensor<P> {
    fn read_level(&mut self) -> Result<bool, SensorError> {
        self.pin.is_high().map_err(|_| SensorError::GpioReadFailed)
    }
}
