//! Actuator drivers, hardware initialisation, and peripheral helpers.

pub mod air_valve;
pub mod buzzer;
pub mod hw_init;
pub mod panel;
pub mod status_led;
