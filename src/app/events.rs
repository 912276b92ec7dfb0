//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them (serial log, test recorder).

use crate::control::actuation::ActuationState;
use crate::control::zone::Zone;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service finished bring-up and is entering the loop.
    Started { armed: bool },

    /// The debounced disarm switch changed position.
    ArmChanged { armed: bool },

    /// The subject moved between zones.
    ZoneChanged {
        from: Zone,
        to: Zone,
        distance_mm: u16,
    },

    /// The air valve was opened for one puff.
    PuffReleased { puffs_used: u8, max_puffs: u8 },

    /// The last puff of the budget was spent.
    BudgetExhausted { puffs_used: u8 },

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryData {
    pub zone: Zone,
    pub distance_mm: u16,
    pub reading_valid: bool,
    pub medium_mm: u16,
    pub near_mm: u16,
    pub armed: bool,
    pub puffs_used: u8,
    pub max_puffs: u8,
    pub exhausted: bool,
    pub actuation_state: ActuationState,
}
