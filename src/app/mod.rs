//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the control loop for the air puffer: input
//! sampling, zone classification, the puff budget and the indicator.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
pub mod state;
