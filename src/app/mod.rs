//! Application core: pure domain logic, zero I/O.
//!
//! The rules for the SOS signal and walk-back guidance live here.  All
//! interaction with the device happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
