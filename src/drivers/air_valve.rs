//! Solenoid air valve driver (relay module, active LOW).
//!
//! Driving the relay pin LOW energises the coil and opens the valve; HIGH
//! releases it.  The pin is already HIGH when this driver is constructed
//! (see `hw_init::init_gpio_outputs`).
//!
//! This is a dumb actuator.  Pulse length and the puff budget live in
//! `control::actuation`; the driver only translates open/closed into a
//! pin level.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the relay GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

/// Pin level that energises the relay.
pub const RELAY_ON_LEVEL: bool = false;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValveState {
    Closed,
    Open,
}

pub struct AirValve {
    state: ValveState,
    /// Completed open→close cycles since boot.
    pulses: u32,
}

impl Default for AirValve {
    fn default() -> Self {
        Self::new()
    }
}

impl AirValve {
    pub fn new() -> Self {
        Self {
            state: ValveState::Closed,
            pulses: 0,
        }
    }

    pub fn open(&mut self) {
        hw_init::gpio_write(pins::AIR_RELAY_GPIO, RELAY_ON_LEVEL);
        self.state = ValveState::Open;
    }

    pub fn close(&mut self) {
        hw_init::gpio_write(pins::AIR_RELAY_GPIO, !RELAY_ON_LEVEL);
        if self.state == ValveState::Open {
            self.pulses += 1;
        }
        self.state = ValveState::Closed;
    }

    pub fn set(&mut self, open: bool) {
        if open {
            self.open();
        } else {
            self.close();
        }
    }

    pub fn state(&self) -> ValveState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ValveState::Open
    }

    pub fn pulses(&self) -> u32 {
        self.pulses
    }
}
