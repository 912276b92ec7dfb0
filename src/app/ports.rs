//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (ranger, GPIO inputs, actuators, event sinks) implement
//! these traits.  The [`AppService`](super::service::AppService) consumes
//! them via generics, so the domain core never touches hardware directly.

use crate::error::SensorError;

// ───────────────────────────────────────────────────────────────
// Range finder port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Status code of a measurement that carries a usable distance.
pub const RANGE_STATUS_VALID: u8 = 0;
/// Reserved status code: out of range / no target / nothing new.
pub const RANGE_STATUS_OUT_OF_RANGE: u8 = 4;

/// One raw answer from the range finder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeMeasurement {
    pub status: u8,
    pub millimeters: u16,
}

/// The distance-ranging collaborator.
pub trait RangeFinderPort {
    /// Bring the ranger up.  Failure is fatal to the device.
    fn begin(&mut self) -> Result<(), SensorError>;

    /// Take one measurement.
    fn read_range(&mut self) -> Result<RangeMeasurement, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Raw operator inputs.  Debouncing and scaling happen in the domain.
pub trait InputPort {
    /// Raw disarm-switch level: `true` = HIGH (open, pull-up),
    /// `false` = LOW (pressed to ground).
    fn disarm_switch_level(&mut self) -> bool;

    /// Raw range potentiometer reading, 0–1023.
    fn range_pot_raw(&mut self) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command outputs.
pub trait ActuatorPort {
    /// Warning buzzer on/off.
    fn set_buzzer(&mut self, on: bool);

    /// Air valve open (relay energised) or closed.
    fn set_air_valve(&mut self, open: bool);

    /// Set the RGB indicator channels (0–255 each).
    fn set_led(&mut self, r: u8, g: u8, b: u8);

    /// Buzzer off, valve closed, LED dark.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log, test
/// recorder, ...).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
