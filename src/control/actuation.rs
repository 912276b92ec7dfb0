//! Air-puff actuation controller.
//!
//! Owns the puff budget, the lockout timer and the valve pulse.
//!
//! ## States
//!
//! | State       | Meaning                                              |
//! |-------------|------------------------------------------------------|
//! | `Idle`      | A NEAR subject would be puffed right now (if armed)  |
//! | `LockedOut` | Less than `lockout_ms` since the last puff started   |
//! | `Exhausted` | Budget spent; terminal until power cycle             |
//!
//! `armed` is a gate, not a state: while disarmed nothing happens at all:
//! no budget is consumed and the lockout timer is left alone.
//!
//! ## Valve pulse
//!
//! A puff opens the valve and arms a [`Deadline`]; the valve is closed on
//! the first tick at or after `puff_length_ms`.  A pulse in progress always
//! runs to completion, whatever the arm state or zone does meanwhile.
//!
//! The budget is a plain counter.  It cannot know how much air is really in
//! the tank; power up with a full tank or the count is wrong.

use crate::config::DeviceConfig;
use crate::control::zone::Zone;
use crate::scheduler::{Deadline, elapsed_ms};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuationState {
    Idle,
    LockedOut,
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuationBudget {
    pub puffs_used: u8,
    pub max_puffs: u8,
    pub exhausted: bool,
    /// Start time of the last puff (seeded with power-on time).
    pub last_actuation_ms: u32,
}

impl ActuationBudget {
    pub fn remaining(&self) -> u8 {
        self.max_puffs - self.puffs_used
    }
}

/// A puff that was started on this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Puff {
    pub puffs_used: u8,
    /// This puff spent the last of the budget.
    pub exhausted: bool,
}

pub struct ActuationController {
    budget: ActuationBudget,
    lockout_ms: u32,
    puff_length_ms: u32,
    valve_close: Deadline,
    /// Latched once `lockout_ms` has passed since the last puff, so a quiet
    /// spell longer than the clock's wrap period cannot re-enter lockout.
    lockout_passed: bool,
}

impl ActuationController {
    pub fn new(config: &DeviceConfig, now_ms: u32) -> Self {
        Self {
            budget: ActuationBudget {
                puffs_used: 0,
                max_puffs: config.max_puffs,
                exhausted: false,
                last_actuation_ms: now_ms,
            },
            lockout_ms: config.lockout_ms,
            puff_length_ms: config.puff_length_ms,
            valve_close: Deadline::new(),
            lockout_passed: false,
        }
    }

    /// Run one tick: finish a pulse that is due, note an expired lockout,
    /// then puff if every condition holds.  Returns the puff started on
    /// this tick, if any.
    pub fn update(&mut self, now_ms: u32, armed: bool, zone: Zone) -> Option<Puff> {
        self.valve_close.expire(now_ms);
        self.refresh_lockout(now_ms);

        if !armed || !zone.permits_actuation() {
            return None;
        }
        if self.state(now_ms) != ActuationState::Idle {
            return None;
        }

        self.valve_close.arm(now_ms, self.puff_length_ms);
        self.budget.last_actuation_ms = now_ms;
        self.budget.puffs_used += 1;
        self.lockout_passed = false;
        if self.budget.puffs_used == self.budget.max_puffs {
            self.budget.exhausted = true;
        }

        Some(Puff {
            puffs_used: self.budget.puffs_used,
            exhausted: self.budget.exhausted,
        })
    }

    pub fn state(&self, now_ms: u32) -> ActuationState {
        if self.budget.exhausted {
            ActuationState::Exhausted
        } else if !self.lockout_passed
            && elapsed_ms(now_ms, self.budget.last_actuation_ms) < self.lockout_ms
        {
            ActuationState::LockedOut
        } else {
            ActuationState::Idle
        }
    }

    fn refresh_lockout(&mut self, now_ms: u32) {
        if !self.lockout_passed
            && elapsed_ms(now_ms, self.budget.last_actuation_ms) >= self.lockout_ms
        {
            self.lockout_passed = true;
        }
    }

    /// Whether the valve should be energised right now.
    pub fn valve_open(&self) -> bool {
        self.valve_close.is_armed()
    }

    pub fn budget(&self) -> ActuationBudget {
        self.budget
    }

    pub fn is_exhausted(&self) -> bool {
        self.budget.exhausted
    }
}
