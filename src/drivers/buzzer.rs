//! Piezo buzzer on a PWM channel.
//!
//! The board drives the buzzer from LEDC channel 0 at 10 kHz with a
//! fixed duty of 900/1023 while sounding.  Pulsing is done by the alert
//! state machine through [`PulsePattern`](super::pulse_pattern::PulsePattern);
//! this driver only switches between "sounding" and "silent".

use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::error::ActuatorError;

pub struct Buzzer<P> {
    pwm: P,
    duty_num: u16,
    duty_denom: u16,
    sounding: Option<bool>,
}

impl<P: SetDutyCycle> Buzzer<P> {
    /// `duty_num / duty_denom` is the fraction applied while sounding.
    pub fn new(pwm: P, duty_num: u16, duty_denom: u16) -> Self {
        Self {
            pwm,
            duty_num: duty_num.min(duty_denom),
            duty_denom: duty_denom.max(1),
            sounding: None,
        }
    }

    pub fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        if self.sounding == Some(on) {
            return Ok(());
        }
        let res = if on {
            self.pwm.set_duty_cycle_fraction(self.duty_num, self.duty_denom)
        } else {
            self.pwm.set_duty_cycle_fully_off()
        };
        res.map_err(|_| ActuatorError::PwmWriteFailed)?;
        self.sounding = Some(on);
        Ok(())
    }

    /// Like [`set`](Self::set), but a failed write is only logged.
    pub fn apply(&mut self, on: bool) {
        if let Err(e) = self.set(on) {
            warn!("buzzer: {}", e);
        }
    }

    pub fn is_sounding(&self) -> bool {
        self.sounding == Some(true)
    }
}
