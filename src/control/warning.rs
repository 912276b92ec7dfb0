//! Proximity warning tone.
//!
//! Whenever the zone warns, the buzzer sounds for `warning_buzz_ms`.  If the
//! subject is still in range when the tone ends, it starts again on the next
//! tick, so a lingering subject hears a continuous tone.

use crate::control::zone::Zone;
use crate::scheduler::Deadline;

pub struct WarningTone {
    duration_ms: u32,
    off: Deadline,
}

impl WarningTone {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            off: Deadline::new(),
        }
    }

    /// Returns `true` if the buzzer should be on after this tick.
    pub fn update(&mut self, now_ms: u32, zone: Zone) -> bool {
        if self.off.expire(now_ms) {
            return false;
        }
        if zone.sounds_warning() && !self.off.is_armed() {
            self.off.arm(now_ms, self.duration_ms);
        }
        self.off.is_armed()
    }
}
