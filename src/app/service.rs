//! Application service, the hexagonal core.
//!
//! [`AppService`] owns the [`ControllerState`] and runs one control cycle
//! per [`tick`](AppService::tick).  All I/O flows through port traits
//! injected at call sites, making the entire service testable with mock
//! adapters.
//!
//! ```text
//!  RangeFinderPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!  InputPort ────────▶ │        AppService         │
//!  ActuatorPort ◀───── │ Zone · Warning · Puff · LED│
//!                      └──────────────────────────┘
//! ```
//!
//! A tick never blocks.  Every timed output (buzzer, valve pulse, LED
//! flash) is a deadline checked on later ticks, so the loop keeps sampling
//! the ranger and the disarm switch while they run.

use log::{debug, error};

use crate::config::DeviceConfig;
use crate::control::zone::{Thresholds, Zone, classify};
use crate::error::{Error, Result};

use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, EventSink, InputPort, RangeFinderPort};
use super::state::{ActuatorCommands, ControllerState};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    config: DeviceConfig,
    state: ControllerState,
    /// What the actuators were last told; only changes are written out.
    applied: ActuatorCommands,
}

impl AppService {
    // ── Lifecycle ─────────────────────────────────────────────

    /// Validate the configuration, drive every output to its safe level
    /// and bring up the range finder.
    ///
    /// A ranger that fails to boot is fatal: the caller is expected to
    /// halt, with the actuators already off.
    pub fn start(
        config: DeviceConfig,
        now_ms: u32,
        hw: &mut (impl RangeFinderPort + InputPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) -> Result<Self> {
        config.validate()?;

        hw.all_off();
        if let Err(e) = hw.begin() {
            error!("Failed to boot range finder: {}", e);
            return Err(Error::Init("range finder did not boot"));
        }

        let state = ControllerState::new(&config, now_ms, hw);
        let armed = state.armed;
        sink.emit(&AppEvent::Started { armed });

        Ok(Self {
            config,
            state,
            applied: ActuatorCommands::all_off(),
        })
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle:
    /// inputs → arm state → zone → warning → actuation → indicator → outputs.
    ///
    /// The `hw` parameter satisfies every port at once; this avoids a
    /// double mutable borrow while keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        now_ms: u32,
        hw: &mut (impl RangeFinderPort + InputPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) {
        let s = &mut self.state;
        s.total_ticks += 1;
        s.now_ms = now_ms;

        // 1. Inputs
        let snapshot = s.hub.read_all(now_ms, hw);
        s.sensors = snapshot;

        // 2. Arm state
        let armed = !snapshot.disarm_pressed;
        if armed != s.armed {
            s.armed = armed;
            sink.emit(&AppEvent::ArmChanged { armed });
        }

        // 3. Zone
        s.thresholds = Thresholds::from_pot(snapshot.pot_raw);
        let zone = classify(snapshot.distance, s.thresholds);
        let distance_mm = snapshot.distance.millimeters;
        if snapshot.fresh_distance && zone != Zone::Far {
            debug!("laserRange {:?}: {} mm", zone, distance_mm);
        }
        if zone != s.zone {
            sink.emit(&AppEvent::ZoneChanged {
                from: s.zone,
                to: zone,
                distance_mm,
            });
            s.zone = zone;
        }

        // 4. Warning tone
        s.commands.buzzer_on = s.warning.update(now_ms, zone);

        // 5. Actuation
        if let Some(puff) = s.actuation.update(now_ms, armed, zone) {
            sink.emit(&AppEvent::PuffReleased {
                puffs_used: puff.puffs_used,
                max_puffs: self.config.max_puffs,
            });
            if puff.exhausted {
                sink.emit(&AppEvent::BudgetExhausted {
                    puffs_used: puff.puffs_used,
                });
            }
        }
        s.commands.valve_open = s.actuation.valve_open();

        // 6. Indicator
        s.commands.led_rgb = s.indicator.tick(now_ms, armed, s.actuation.is_exhausted());

        // 7. Outputs
        self.apply_actuators(hw);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the current state.
    pub fn build_telemetry(&self) -> TelemetryData {
        let s = &self.state;
        let budget = s.actuation.budget();
        TelemetryData {
            zone: s.zone,
            distance_mm: s.sensors.distance.millimeters,
            reading_valid: s.sensors.distance.valid,
            medium_mm: s.thresholds.medium_mm,
            near_mm: s.thresholds.near_mm,
            armed: s.armed,
            puffs_used: budget.puffs_used,
            max_puffs: budget.max_puffs,
            exhausted: budget.exhausted,
            actuation_state: s.actuation.state(s.now_ms),
        }
    }

    /// Read-only view of the controller state.
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.state.total_ticks
    }

    // ── Internal ──────────────────────────────────────────────

    /// Translate the tick's commands into port calls, touching only the
    /// outputs whose level changed.
    fn apply_actuators(&mut self, hw: &mut impl ActuatorPort) {
        let cmds = self.state.commands;

        if cmds.buzzer_on != self.applied.buzzer_on {
            hw.set_buzzer(cmds.buzzer_on);
        }
        if cmds.valve_open != self.applied.valve_open {
            hw.set_air_valve(cmds.valve_open);
        }
        if cmds.led_rgb != self.applied.led_rgb {
            let (r, g, b) = cmds.led_rgb;
            hw.set_led(r, g, b);
        }

        self.applied = cmds;
    }
}
