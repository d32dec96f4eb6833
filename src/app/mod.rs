//! Application core — pure domain logic, zero I/O.
//!
//! The alert service (state machine plus notification latch) and the
//! command interface live here.  All interaction with hardware and the
//! reporting layer happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
