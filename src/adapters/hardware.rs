//! Hardware adapter — bridges the output drivers to domain port traits.
//!
//! Generic over `embedded-hal` pins so the same adapter drives ESP-IDF
//! `PinDriver` / `LedcDriver` on the board and recording fakes on the host.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::app::ports::{AlertOutputPort, LightPort};
use crate::drivers::buzzer::Buzzer;
use crate::drivers::indicator::Indicator;

/// Alert LED plus buzzer, owned by the alert task.
pub struct AlertOutputs<A, B> {
    led: Indicator<A>,
    buzzer: Buzzer<B>,
}

impl<A: OutputPin, B: SetDutyCycle> AlertOutputs<A, B> {
    pub fn new(led: Indicator<A>, buzzer: Buzzer<B>) -> Self {
        Self { led, buzzer }
    }
}

// ── AlertOutputPort implementation ────────────────────────────

impl<A: OutputPin, B: SetDutyCycle> AlertOutputPort for AlertOutputs<A, B> {
    fn set_alert_led(&mut self, on: bool) {
        self.led.apply(on);
    }

    fn set_buzzer(&mut self, on: bool) {
        self.buzzer.apply(on);
    }
}

/// Primary light, owned by the command interface.
pub struct LightOutput<P> {
    light: Indicator<P>,
}

impl<P: OutputPin> LightOutput<P> {
    pub fn new(light: Indicator<P>) -> Self {
        Self { light }
    }

    pub fn is_on(&self) -> bool {
        self.light.is_on()
    }
}

// ── LightPort implementation ──────────────────────────────────

impl<P: OutputPin> LightPort for LightOutput<P> {
    fn set_light(&mut self, on: bool) {
        self.light.apply(on);
    }
}
