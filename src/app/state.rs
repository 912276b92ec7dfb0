//! Controller state threaded through every tick.
//!
//! `ControllerState` is the single struct the control loop reads from and
//! writes to: the input handlers, the decision components, the latest
//! sensor snapshot and the actuator commands derived from it.  It is owned
//! by the [`AppService`](super::service::AppService) and updated by
//! exclusive reference once per tick; nothing in the domain is global.

use crate::app::ports::InputPort;
use crate::config::DeviceConfig;
use crate::control::actuation::ActuationController;
use crate::control::indicator::{IndicatorArbiter, LED_OFF, Rgb};
use crate::control::warning::WarningTone;
use crate::control::zone::{Thresholds, Zone};
use crate::sensors::SensorHub;
use crate::sensors::range::DistanceSample;

// ---------------------------------------------------------------------------
// Sensor snapshot (written by the sensor hub each tick)
// ---------------------------------------------------------------------------

/// A point-in-time view of every input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorSnapshot {
    /// Held distance sample.
    pub distance: DistanceSample,
    /// The ranger produced a new valid reading on this tick.
    pub fresh_distance: bool,
    /// Debounced disarm switch: `true` = pressed = puffer disarmed.
    pub disarm_pressed: bool,
    /// Range potentiometer, clamped to 0–1023.
    pub pot_raw: u16,
}

// ---------------------------------------------------------------------------
// Actuator commands (written by the tick; applied through ActuatorPort)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorCommands {
    pub buzzer_on: bool,
    pub valve_open: bool,
    /// Status LED colour (R, G, B), each 0–255.
    pub led_rgb: Rgb,
}

impl Default for ActuatorCommands {
    fn default() -> Self {
        Self {
            buzzer_on: false,
            valve_open: false,
            led_rgb: LED_OFF,
        }
    }
}

impl ActuatorCommands {
    /// All outputs off.
    pub fn all_off() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// ControllerState
// ---------------------------------------------------------------------------

pub struct ControllerState {
    // -- Components --
    pub hub: SensorHub,
    pub warning: WarningTone,
    pub actuation: ActuationController,
    pub indicator: IndicatorArbiter,

    // -- Derived every tick --
    pub sensors: SensorSnapshot,
    pub thresholds: Thresholds,
    pub zone: Zone,
    pub armed: bool,

    // -- Outputs --
    pub commands: ActuatorCommands,

    // -- Timing --
    /// Uptime (ms) of the most recent tick.
    pub now_ms: u32,
    /// Monotonic total tick count.
    pub total_ticks: u64,
}

impl ControllerState {
    /// Power-on state.  Every timer starts counting at `now_ms`.
    pub fn new(config: &DeviceConfig, now_ms: u32, inputs: &mut impl InputPort) -> Self {
        let hub = SensorHub::new(config, now_ms, inputs);
        let armed = hub.disarm_switch.level();
        let sensors = SensorSnapshot {
            distance: hub.range.held(),
            fresh_distance: false,
            disarm_pressed: !armed,
            pot_raw: 0,
        };

        Self {
            hub,
            warning: WarningTone::new(config.warning_buzz_ms),
            actuation: ActuationController::new(config, now_ms),
            indicator: IndicatorArbiter::new(config, now_ms),
            sensors,
            thresholds: Thresholds::from_pot(0),
            zone: Zone::Far,
            armed,
            commands: ActuatorCommands::all_off(),
            now_ms,
            total_ticks: 0,
        }
    }
}
