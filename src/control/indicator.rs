//! Indicator arbiter for the single RGB status LED.
//!
//! One LED has to say three things, so it says them one flash at a time.
//! The main loop calls `tick()` each control cycle, and the arbiter returns
//! the RGB tuple to feed into `StatusLed::set_colour()`.
//!
//! ## Priority hierarchy (highest first)
//!
//! 1. **Exhausted**: blue flash; strictly pre-empts the status flash,
//!    cutting one that is already lit
//! 2. **Armed**: red flash
//! 3. **Disarmed**: green flash
//!
//! Every flash lights exactly one channel at `flash_brightness` for
//! `flash_on_ms`, then returns to all-off.  Each category keeps its own
//! cadence, measured between flash starts.

use crate::config::DeviceConfig;
use crate::scheduler::{Deadline, Interval};

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

pub const LED_OFF: Rgb = (0, 0, 0);

/// What the indicator is trying to communicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorSignal {
    Exhausted,
    Armed,
    Disarmed,
}

impl IndicatorSignal {
    /// Pick the highest-priority signal for the current device state.
    pub fn select(armed: bool, exhausted: bool) -> Self {
        if exhausted {
            Self::Exhausted
        } else if armed {
            Self::Armed
        } else {
            Self::Disarmed
        }
    }

    pub fn colour(self, brightness: u8) -> Rgb {
        match self {
            Self::Armed => (brightness, 0, 0),
            Self::Disarmed => (0, brightness, 0),
            Self::Exhausted => (0, 0, brightness),
        }
    }
}

pub struct IndicatorArbiter {
    brightness: u8,
    flash_on_ms: u32,
    status_cadence: Interval,
    exhausted_cadence: Interval,
    lit: Option<IndicatorSignal>,
    lit_off: Deadline,
}

impl IndicatorArbiter {
    pub fn new(config: &DeviceConfig, now_ms: u32) -> Self {
        Self {
            brightness: config.flash_brightness,
            flash_on_ms: config.flash_on_ms,
            status_cadence: Interval::new(config.status_flash_interval_ms, now_ms),
            exhausted_cadence: Interval::new(config.exhausted_flash_interval_ms, now_ms),
            lit: None,
            lit_off: Deadline::new(),
        }
    }

    /// Advance the flash schedule and return the LED output for this tick.
    pub fn tick(&mut self, now_ms: u32, armed: bool, exhausted: bool) -> Rgb {
        if self.lit_off.expire(now_ms) {
            self.lit = None;
        }

        let requested = IndicatorSignal::select(armed, exhausted);
        if exhausted && self.lit.is_some_and(|s| s != IndicatorSignal::Exhausted) {
            self.lit_off.cancel();
            self.lit = None;
        }

        if self.lit.is_none() {
            let cadence = if exhausted {
                &mut self.exhausted_cadence
            } else {
                &mut self.status_cadence
            };
            if cadence.poll(now_ms) {
                self.lit = Some(requested);
                self.lit_off.arm(now_ms, self.flash_on_ms);
            }
        }

        self.output()
    }

    /// Current LED output without advancing anything.
    pub fn output(&self) -> Rgb {
        match self.lit {
            Some(signal) => signal.colour(self.brightness),
            None => LED_OFF,
        }
    }

    /// The signal currently being flashed, if the LED is lit.
    pub fn lit_signal(&self) -> Option<IndicatorSignal> {
        self.lit
    }
}
