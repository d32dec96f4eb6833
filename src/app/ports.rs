//! Port traits — the hexagonal boundary between the alert core and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AlertService / CommandHandler (domain)
//! ```
//!
//! Driven adapters (IR input, light, alert outputs, cloud reporter, event
//! log) implement these traits.  The domain consumes them via generics, so
//! the core never touches GPIO, PWM, or the network directly.

use core::fmt;

use serde::Serialize;

use crate::error::{ReportError, SensorError};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Raw digital input the sensor poller samples.
pub trait SensorPort {
    /// Current electrical level: `true` = HIGH, `false` = LOW.
    /// The poller applies the active-level convention, not the adapter.
    fn read_level(&mut self) -> Result<bool, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator ports (driven adapters: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Alert outputs owned by the alert state machine.
pub trait AlertOutputPort {
    /// Latched alert indicator.
    fn set_alert_led(&mut self, on: bool);

    /// Audible output; the state machine pulses this.
    fn set_buzzer(&mut self, on: bool);
}

/// Primary output owned by the command interface.
pub trait LightPort {
    fn set_light(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Reporter port (driven adapter: domain → cloud / dashboard)
// ───────────────────────────────────────────────────────────────

/// Outbound notification and parameter reporting.
///
/// Takes `&self` because both the alert task and the command dispatch
/// context report through the same instance.  Calls are best-effort: the
/// core logs failures and never retries.
pub trait ReporterPort {
    /// One-shot push notification.  At most once per alert episode.
    fn raise_alert(&self, message: &str) -> Result<(), ReportError>;

    /// Update a device parameter on the reporting side.
    fn report_param(&self, param: Param, value: ParamValue) -> Result<(), ReportError>;
}

impl<T: ReporterPort + ?Sized> ReporterPort for &T {
    fn raise_alert(&self, message: &str) -> Result<(), ReportError> {
        (**self).raise_alert(message)
    }

    fn report_param(&self, param: Param, value: ParamValue) -> Result<(), ReportError> {
        (**self).report_param(param, value)
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Reported parameters
// ───────────────────────────────────────────────────────────────

/// Parameters exchanged with the reporting layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    /// Light on/off (read/write).
    Power,
    /// Alert reset trigger (write true, always echoed back false).
    Reset,
    /// Human-readable intruder status (read-only).
    IntruderStatus,
}

impl Param {
    /// Wire name of the parameter.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Power => "Power",
            Self::Reset => "Reset",
            Self::IntruderStatus => "Intruder_Status",
        }
    }

    /// Look up a writable parameter by wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Power" => Some(Self::Power),
            "Reset" => Some(Self::Reset),
            "Intruder_Status" => Some(Self::IntruderStatus),
            _ => None,
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Externally visible alert summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IntruderStatus {
    Clear,
    Alerted,
}

impl IntruderStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Alerted => "Alerted",
        }
    }
}

/// Value attached to a [`Param`] report.  Serialises to a bare JSON value
/// (`true`, `"Alerted"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Status(IntruderStatus),
}

impl ParamValue {
    /// JSON encoding handed to the reporting layer.
    pub fn to_json(&self) -> Result<heapless::String<16>, ReportError> {
        let encoded = serde_json::to_string(self).map_err(|_| ReportError::Encoding)?;
        heapless::String::try_from(encoded.as_str()).map_err(|_| ReportError::Encoding)
    }
}
