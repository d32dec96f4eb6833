//! GPIO / peripheral pin assignments for the intruder alert board.
//!
//! Single source of truth — the boot code references this module rather
//! than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Primary output
// ---------------------------------------------------------------------------

/// Light controlled by the `Power` parameter (active HIGH).
pub const LIGHT_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Intrusion sensing
// ---------------------------------------------------------------------------

/// IR obstacle sensor output.  Driven LOW while something is in the beam.
/// Configured as a plain input, no internal pulls.
pub const IR_SENSOR_GPIO: i32 = 3;

// ---------------------------------------------------------------------------
// Alert outputs
// ---------------------------------------------------------------------------

/// Red alert LED, latched on for the whole alert episode.
pub const ALERT_LED_GPIO: i32 = 4;

/// Piezo buzzer, driven by LEDC channel 0 on timer 0.
pub const BUZZER_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Buzzer PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  10-bit gives 0 – 1023 duty levels.
pub const BUZZER_PWM_RESOLUTION_BITS: u32 = 10;
/// LEDC base frequency for the buzzer.
pub const BUZZER_PWM_FREQ_HZ: u32 = 10_000;
/// Duty applied while the buzzer sounds, out of `2^BUZZER_PWM_RESOLUTION_BITS`.
pub const BUZZER_DUTY: u16 = 900;
/// Full-scale duty for [`BUZZER_PWM_RESOLUTION_BITS`].
pub const BUZZER_DUTY_MAX: u16 = (1 << BUZZER_PWM_RESOLUTION_BITS) - 1;
