//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | zone={:?} | dist={}mm{} | medium<={}mm near<={}mm | \
                     {} | puffs={}/{} | {:?}",
                    t.zone,
                    t.distance_mm,
                    if t.reading_valid { "" } else { " (held)" },
                    t.medium_mm,
                    t.near_mm,
                    if t.armed { "ARMED" } else { "DISARMED" },
                    t.puffs_used,
                    t.max_puffs,
                    t.actuation_state,
                );
            }
            AppEvent::ZoneChanged { from, to, distance_mm } => {
                info!("ZONE  | {:?} -> {:?} at {}mm", from, to, distance_mm);
            }
            AppEvent::ArmChanged { armed } => {
                info!("ARM   | {}", if *armed { "armed" } else { "disarmed" });
            }
            AppEvent::PuffReleased { puffs_used, max_puffs } => {
                info!("PUFF  | {}/{}", puffs_used, max_puffs);
            }
            AppEvent::BudgetExhausted { puffs_used } => {
                warn!("PUFF  | out of air after {} puffs", puffs_used);
            }
            AppEvent::Started { armed } => {
                info!("START | armed={}", armed);
            }
        }
    }
}
