//! Output drivers and thread helpers.

pub mod buzzer;
pub mod indicator;
pub mod pulse_pattern;
pub mod task_pin;
