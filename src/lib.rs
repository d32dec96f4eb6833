//! Intruder alert firmware library.
//!
//! Exposes the alert core (shared state, sensor poller, event relay,
//! alert state machine, command interface) for the firmware binary and
//! for host-side integration tests.  All ESP-IDF-specific code is guarded
//! by `#[cfg(target_os = "espidf")]`.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod events;
pub mod fsm;
pub mod pins;
pub mod relay;
pub mod sensors;
pub mod state;
pub mod tasks;

#[cfg(target_os = "espidf")]
mod esp_link_shims;
