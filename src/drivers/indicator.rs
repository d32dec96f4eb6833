//! Single-colour indicator on a digital output (light, alert LED).
//!
//! Dumb actuator: remembers the last level it wrote and skips redundant
//! writes, so callers may re-apply the same level every tick.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::error::ActuatorError;

pub struct Indicator<P> {
    pin: P,
    name: &'static str,
    /// Last level successfully written; `None` until the first write.
    lit: Option<bool>,
}

impl<P: OutputPin> Indicator<P> {
    pub fn new(pin: P, name: &'static str) -> Self {
        Self {
            pin,
            name,
            lit: None,
        }
    }

    pub fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        if self.lit == Some(on) {
            return Ok(());
        }
        let res = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        res.map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.lit = Some(on);
        Ok(())
    }

    /// Like [`set`](Self::set), but a failed write is only logged.
    pub fn apply(&mut self, on: bool) {
        if let Err(e) = self.set(on) {
            warn!("{}: {}", self.name, e);
        }
    }

    pub fn is_on(&self) -> bool {
        self.lit == Some(true)
    }
}
