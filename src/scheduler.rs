//! Non-blocking timing primitives.
//!
//! The control loop never sleeps inside a tick.  Anything that used to be
//! "turn on, wait, turn off" is a [`Deadline`] armed when the output goes
//! on and checked on every later tick; anything periodic is an
//! [`Interval`].
//!
//! ```text
//!   tick(now) ──▶ Interval::poll(now) ──▶ due?  ──▶ query / start flash
//!             ──▶ Deadline::expire(now) ─▶ passed? ─▶ output off
//! ```
//!
//! All arithmetic is on a wrapping `u32` millisecond clock, so the
//! ~49.7-day rollover of the uptime counter is harmless as long as no
//! single period exceeds half the range.

/// Milliseconds elapsed from `since` to `now` on a wrapping clock.
#[inline]
pub fn elapsed_ms(now_ms: u32, since_ms: u32) -> u32 {
    now_ms.wrapping_sub(since_ms)
}

// ═══════════════════════════════════════════════════════════════
//  Deadline
// ═══════════════════════════════════════════════════════════════

/// A one-shot deactivation event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline {
    armed: Option<Armed>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Armed {
    since_ms: u32,
    duration_ms: u32,
}

impl Deadline {
    pub const fn new() -> Self {
        Self { armed: None }
    }

    /// Arm (or re-arm) the deadline `duration_ms` after `now_ms`.
    pub fn arm(&mut self, now_ms: u32, duration_ms: u32) {
        self.armed = Some(Armed {
            since_ms: now_ms,
            duration_ms,
        });
    }

    /// Disarm without firing.
    pub fn cancel(&mut self) {
        self.armed = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// True exactly once: on the first call at or after the deadline.
    /// The deadline is disarmed when it fires.
    pub fn expire(&mut self, now_ms: u32) -> bool {
        match self.armed {
            Some(a) if elapsed_ms(now_ms, a.since_ms) >= a.duration_ms => {
                self.armed = None;
                true
            }
            _ => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Interval
// ═══════════════════════════════════════════════════════════════

/// A periodic check that remembers when it last fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    period_ms: u32,
    last_ms: u32,
}

impl Interval {
    /// Start counting from `now_ms`; the first fire is one period later.
    pub fn new(period_ms: u32, now_ms: u32) -> Self {
        Self {
            period_ms,
            last_ms: now_ms,
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Uptime of the last fire (or of construction / reset).
    pub fn last_ms(&self) -> u32 {
        self.last_ms
    }

    /// Whether a full period has passed, without consuming it.
    pub fn is_due(&self, now_ms: u32) -> bool {
        elapsed_ms(now_ms, self.last_ms) >= self.period_ms
    }

    /// If due, record `now_ms` as the last fire and return `true`.
    pub fn poll(&mut self, now_ms: u32) -> bool {
        if self.is_due(now_ms) {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }

    /// Restart the period from `now_ms`.
    pub fn reset(&mut self, now_ms: u32) {
        self.last_ms = now_ms;
    }
}
