//! System configuration parameters
//!
//! All tunable parameters of the alert core.  The polling cadences of the
//! board (100 ms sensor / relay / drive, 200 ms buzzer phase) are
//! the defaults, not hard-coded constants.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::drivers::pulse_pattern::burst_len_ms;

/// Message passed to `raise_alert` when an episode starts.
pub const DEFAULT_ALERT_MESSAGE: &str = "Intruder Alert 🚨";

/// Maximum encoded length of the alert message.
pub const ALERT_MESSAGE_CAP: usize = 64;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertConfig {
    // --- Timing ---
    /// IR sensor sampling interval (milliseconds)
    pub sensor_poll_interval_ms: u32,
    /// Event relay sampling interval (milliseconds)
    pub relay_interval_ms: u32,
    /// Alert state machine drive tick (milliseconds)
    pub drive_interval_ms: u32,

    // --- Buzzer ---
    /// Length of one buzzer on (or off) phase (milliseconds)
    pub buzzer_phase_ms: u32,
    /// On/off cycles per burst before the inter-burst gap
    pub buzzer_cycles: u8,

    // --- Sensor ---
    /// `true` when a LOW input level means "intrusion"
    pub sensor_active_low: bool,

    // --- Behaviour ---
    /// Light state applied at boot
    pub default_power: bool,
    /// Text handed to the notifier once per episode
    pub alert_message: heapless::String<ALERT_MESSAGE_CAP>,
}

impl Default for AlertConfig {
    fn default() -> Self {
        let mut alert_message = heapless::String::new();
        // Fits: the default message is well under ALERT_MESSAGE_CAP bytes.
        let _ = alert_message.push_str(DEFAULT_ALERT_MESSAGE);

        Self {
            // Timing
            sensor_poll_interval_ms: 100, // 10 Hz
            relay_interval_ms: 100,
            drive_interval_ms: 100,

            // Buzzer: 5 × (200 ms on + 200 ms off)
            buzzer_phase_ms: 200,
            buzzer_cycles: 5,

            // IR module pulls its output low on detection
            sensor_active_low: true,

            default_power: true,
            alert_message,
        }
    }
}

impl AlertConfig {
    /// Reject values that would stall a task or silence the alert.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sensor_poll_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("sensor_poll_interval_ms must be > 0"));
        }
        if self.relay_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("relay_interval_ms must be > 0"));
        }
        if self.drive_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("drive_interval_ms must be > 0"));
        }
        if self.buzzer_phase_ms < self.drive_interval_ms {
            return Err(ConfigError::ValidationFailed(
                "buzzer_phase_ms must be >= drive_interval_ms",
            ));
        }
        if self.buzzer_cycles == 0 {
            return Err(ConfigError::ValidationFailed("buzzer_cycles must be > 0"));
        }
        let period = burst_len_ms(self.buzzer_phase_ms, self.buzzer_cycles)
            .and_then(|burst| burst.checked_add(self.drive_interval_ms));
        if period.is_none() {
            return Err(ConfigError::ValidationFailed(
                "buzzer burst plus gap must fit in u32 milliseconds",
            ));
        }
        if self.alert_message.is_empty() {
            return Err(ConfigError::ValidationFailed("alert_message must not be empty"));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }
}

/// Errors from configuration parsing and validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Document failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Corrupted => Self::Config("config corrupted"),
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
        }
    }
}
