//! Sensor subsystem: individual input handlers and the aggregating [`SensorHub`].
//!
//! The hub owns the distance sampler and the disarm-switch debouncer and
//! produces a [`SensorSnapshot`] each tick that gets written into
//! `ControllerState.sensors`.

pub mod range;
pub mod switch;
pub mod vl53l0x;

use crate::app::ports::{InputPort, RangeFinderPort};
use crate::app::state::SensorSnapshot;
use crate::config::DeviceConfig;
use range::RangeSampler;
use switch::SwitchDebouncer;

/// Full-scale raw value of the range potentiometer (10-bit).
pub const POT_RAW_MAX: u16 = 1023;

/// Aggregates the input handlers and produces a unified snapshot.
pub struct SensorHub {
    pub range: RangeSampler,
    pub disarm_switch: SwitchDebouncer,
}

impl SensorHub {
    /// Build the hub at boot.  The switch is read once so the first
    /// debounced level reflects the real switch position.
    pub fn new(config: &DeviceConfig, now_ms: u32, inputs: &mut impl InputPort) -> Self {
        let initial = inputs.disarm_switch_level();
        Self {
            range: RangeSampler::new(config.check_interval_ms, config.default_distance_mm, now_ms),
            disarm_switch: SwitchDebouncer::new(config.debounce_ms, initial, now_ms),
        }
    }

    /// Read every input in loop order: switch, potentiometer, then the
    /// ranger (on its own cadence).
    pub fn read_all(
        &mut self,
        now_ms: u32,
        hw: &mut (impl RangeFinderPort + InputPort),
    ) -> SensorSnapshot {
        let switch_level = self.disarm_switch.update(now_ms, hw.disarm_switch_level());
        let pot_raw = hw.range_pot_raw().min(POT_RAW_MAX);
        let tick = self.range.sample(now_ms, hw);

        SensorSnapshot {
            distance: tick.sample,
            fresh_distance: tick.fresh,
            // Pull-up: HIGH = switch open = puffer armed.
            disarm_pressed: !switch_level,
            pot_raw,
        }
    }
}
