//! Device configuration parameters
//!
//! Every timing constant, the actuation budget and the indicator brightness.
//! Behaviour is fixed at build time: the defaults below are what the
//! firmware runs with, and nothing is persisted across power cycles.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core device configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    // --- Ranging ---
    /// How often the range finder is queried (milliseconds)
    pub check_interval_ms: u32,
    /// Distance held before the first valid reading ("nothing nearby")
    pub default_distance_mm: u16,

    // --- Air puffer ---
    /// Puffs available per tank fill
    pub max_puffs: u8,
    /// Minimum time between puff starts (milliseconds)
    pub lockout_ms: u32,
    /// How long the air valve stays open per puff (milliseconds)
    pub puff_length_ms: u32,

    // --- Warning buzzer ---
    /// Buzzer on-time per warning (milliseconds)
    pub warning_buzz_ms: u32,

    // --- Indicator LED ---
    /// On-time of every flash (milliseconds)
    pub flash_on_ms: u32,
    /// Armed / disarmed flash period (milliseconds)
    pub status_flash_interval_ms: u32,
    /// Out-of-air flash period (milliseconds)
    pub exhausted_flash_interval_ms: u32,
    /// PWM level of the lit channel (0-255)
    pub flash_brightness: u8,

    // --- Inputs ---
    /// Disarm switch must hold a level this long to be accepted (milliseconds)
    pub debounce_ms: u32,

    // --- Loop ---
    /// Yield between control loop iterations (milliseconds)
    pub loop_period_ms: u32,
    /// Telemetry record period (milliseconds)
    pub telemetry_interval_ms: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            // Ranging
            check_interval_ms: 100, // 10 Hz
            default_distance_mm: 5000,

            // Air puffer
            max_puffs: 15,
            lockout_ms: 5000,
            puff_length_ms: 100,

            // Warning buzzer
            warning_buzz_ms: 1000,

            // Indicator LED
            flash_on_ms: 200,
            status_flash_interval_ms: 1000,
            exhausted_flash_interval_ms: 1000,
            flash_brightness: 128,

            // Inputs
            debounce_ms: 20,

            // Loop
            loop_period_ms: 1,
            telemetry_interval_ms: 5000,
        }
    }
}

impl DeviceConfig {
    /// Reject configurations the control loop cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.check_interval_ms == 0 {
            return Err(Error::Config("check_interval_ms must be non-zero"));
        }
        if self.max_puffs == 0 {
            return Err(Error::Config("max_puffs must be non-zero"));
        }
        if self.puff_length_ms == 0 || self.puff_length_ms >= self.lockout_ms {
            return Err(Error::Config("puff_length_ms must be in 1..lockout_ms"));
        }
        if self.warning_buzz_ms == 0 {
            return Err(Error::Config("warning_buzz_ms must be non-zero"));
        }
        if self.flash_on_ms == 0
            || self.flash_on_ms >= self.status_flash_interval_ms
            || self.flash_on_ms >= self.exhausted_flash_interval_ms
        {
            return Err(Error::Config("flash_on_ms must be shorter than every flash interval"));
        }
        if self.debounce_ms == 0 {
            return Err(Error::Config("debounce_ms must be non-zero"));
        }
        if self.telemetry_interval_ms == 0 {
            return Err(Error::Config("telemetry_interval_ms must be non-zero"));
        }
        Ok(())
    }
}
