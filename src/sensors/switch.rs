//! Non-blocking debouncer for the disarm switch.
//!
//! ## Hardware
//!
//! Toggle switch to ground with the internal pull-up enabled, so the raw
//! level is HIGH when open and LOW when closed.  The main loop samples the
//! raw level every tick and feeds it to [`SwitchDebouncer::update`].
//!
//! ## Debounce
//!
//! The stable level only follows the raw level once the raw level has
//! been constant for the whole window.  Any bounce restarts the window.
//! Nothing here sleeps; a bouncing contact simply keeps the previous
//! stable level until it settles.

use crate::scheduler::elapsed_ms;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchDebouncer {
    window_ms: u32,
    stable: bool,
    candidate: bool,
    candidate_since_ms: u32,
}

impl SwitchDebouncer {
    /// `initial_level` is taken as already stable (read once at boot).
    pub fn new(window_ms: u32, initial_level: bool, now_ms: u32) -> Self {
        Self {
            window_ms,
            stable: initial_level,
            candidate: initial_level,
            candidate_since_ms: now_ms,
        }
    }

    /// Feed one raw sample; returns the debounced level.
    pub fn update(&mut self, now_ms: u32, raw_level: bool) -> bool {
        if raw_level != self.candidate {
            self.candidate = raw_level;
            self.candidate_since_ms = now_ms;
        } else if self.candidate != self.stable
            && elapsed_ms(now_ms, self.candidate_since_ms) >= self.window_ms
        {
            self.stable = self.candidate;
        }
        self.stable
    }

    /// Last debounced level.
    pub fn level(&self) -> bool {
        self.stable
    }
}
