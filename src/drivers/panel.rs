//! Operator panel: the disarm switch and the range potentiometer.
//!
//! Both are read raw here; debouncing and clamping happen in `sensors`.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the switch GPIO and the pot ADC via hw_init helpers.
//! A failed ADC conversion repeats the last good pot position.
//! On host/test: reads from static atomics for injection.  The defaults
//! are switch open (armed) and the pot at full scale.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(not(target_os = "espidf"))]
static SIM_DISARM_SWITCH: AtomicBool = AtomicBool::new(true);
#[cfg(not(target_os = "espidf"))]
static SIM_RANGE_POT: AtomicU16 = AtomicU16::new(1023);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_disarm_switch(level_high: bool) {
    SIM_DISARM_SWITCH.store(level_high, Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_range_pot(raw: u16) {
    SIM_RANGE_POT.store(raw, Ordering::Relaxed);
}

pub struct OperatorPanel {
    /// Last good pot reading.  Zero until the first conversion succeeds,
    /// which keeps both thresholds at 0 mm (nothing is puffed).
    last_pot: u16,
}

impl Default for OperatorPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl OperatorPanel {
    pub fn new() -> Self {
        Self { last_pot: 0 }
    }

    /// Raw switch level: HIGH = open = armed.
    #[cfg(target_os = "espidf")]
    pub fn switch_level(&self) -> bool {
        hw_init::gpio_read(pins::DISARM_SWITCH_GPIO)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn switch_level(&self) -> bool {
        SIM_DISARM_SWITCH.load(Ordering::Relaxed)
    }

    /// Pot position scaled from the 12-bit ADC to 10 bits (0–1023).
    #[cfg(target_os = "espidf")]
    pub fn pot_raw(&mut self) -> u16 {
        let reading = hw_init::adc1_read(hw_init::ADC1_CH_RANGE_POT).map(|raw| raw >> 2);
        self.accept_pot(reading)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn pot_raw(&mut self) -> u16 {
        self.accept_pot(Some(SIM_RANGE_POT.load(Ordering::Relaxed)))
    }

    /// A failed conversion repeats the previous position.
    fn accept_pot(&mut self, reading: Option<u16>) -> u16 {
        if let Some(raw) = reading {
            self.last_pot = raw;
        }
        self.last_pot
    }
}
