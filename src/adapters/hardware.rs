//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the range finder, the operator panel and all actuator drivers,
//! exposing them through [`RangeFinderPort`], [`InputPort`] and
//! [`ActuatorPort`].  This is the only module in the system that touches
//! actual hardware.  On non-espidf targets, the underlying drivers use
//! cfg-gated simulation stubs.
//!
//! The ranger is generic so the same adapter drives the real VL53L0X on
//! the board and a scripted double on the host.

use crate::app::ports::{ActuatorPort, InputPort, RangeFinderPort, RangeMeasurement};
use crate::drivers::air_valve::AirValve;
use crate::drivers::buzzer::Buzzer;
use crate::drivers::panel::OperatorPanel;
use crate::drivers::status_led::StatusLed;
use crate::error::SensorError;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<R> {
    ranger: R,
    panel: OperatorPanel,
    buzzer: Buzzer,
    valve: AirValve,
    led: StatusLed,
}

impl<R: RangeFinderPort> HardwareAdapter<R> {
    pub fn new(
        ranger: R,
        panel: OperatorPanel,
        buzzer: Buzzer,
        valve: AirValve,
        led: StatusLed,
    ) -> Self {
        Self {
            ranger,
            panel,
            buzzer,
            valve,
            led,
        }
    }

    pub fn valve(&self) -> &AirValve {
        &self.valve
    }

    pub fn buzzer(&self) -> &Buzzer {
        &self.buzzer
    }

    pub fn led(&self) -> &StatusLed {
        &self.led
    }
}

// ── RangeFinderPort implementation ────────────────────────────

impl<R: RangeFinderPort> RangeFinderPort for HardwareAdapter<R> {
    fn begin(&mut self) -> Result<(), SensorError> {
        self.ranger.begin()
    }

    fn read_range(&mut self) -> Result<RangeMeasurement, SensorError> {
        self.ranger.read_range()
    }
}

// ── InputPort implementation ──────────────────────────────────

impl<R: RangeFinderPort> InputPort for HardwareAdapter<R> {
    fn disarm_switch_level(&mut self) -> bool {
        self.panel.switch_level()
    }

    fn range_pot_raw(&mut self) -> u16 {
        self.panel.pot_raw()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<R: RangeFinderPort> ActuatorPort for HardwareAdapter<R> {
    fn set_buzzer(&mut self, on: bool) {
        self.buzzer.set(on);
    }

    fn set_air_valve(&mut self, open: bool) {
        self.valve.set(open);
    }

    fn set_led(&mut self, r: u8, g: u8, b: u8) {
        self.led.set_colour(r, g, b);
    }

    fn all_off(&mut self) {
        self.valve.close();
        self.buzzer.set(false);
        self.led.off();
    }
}
