//! Mock hardware adapter for integration tests.
//!
//! Plays back scripted ranger replies, exposes settable operator inputs
//! and records every actuator call so tests can assert on the full command
//! history without touching real GPIO/PWM registers.

use std::collections::VecDeque;

use airpuffer::app::events::AppEvent;
use airpuffer::app::ports::{
    ActuatorPort, EventSink, InputPort, RANGE_STATUS_OUT_OF_RANGE, RANGE_STATUS_VALID,
    RangeFinderPort, RangeMeasurement,
};
use airpuffer::error::SensorError;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    SetBuzzer(bool),
    SetAirValve(bool),
    SetLed { r: u8, g: u8, b: u8 },
    AllOff,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
    /// `begin()` result.
    pub boots: bool,
    /// One reply per `read_range()`; `distance_mm` answers once it is empty.
    pub script: VecDeque<Result<RangeMeasurement, SensorError>>,
    /// Steady-state distance; `None` = out of range.
    pub distance_mm: Option<u16>,
    pub range_reads: u32,
    /// Raw switch level: `true` = open (armed).
    pub switch_level: bool,
    pub pot: u16,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            boots: true,
            script: VecDeque::new(),
            distance_mm: None,
            range_reads: 0,
            switch_level: true,
            pot: 1000,
        }
    }

    /// Subject parked at a fixed distance.
    pub fn at(distance_mm: u16) -> Self {
        Self {
            distance_mm: Some(distance_mm),
            ..Self::new()
        }
    }

    pub fn push_reading(&mut self, millimeters: u16) {
        self.script.push_back(Ok(RangeMeasurement {
            status: RANGE_STATUS_VALID,
            millimeters,
        }));
    }

    pub fn push_out_of_range(&mut self) {
        self.script.push_back(Ok(RangeMeasurement {
            status: RANGE_STATUS_OUT_OF_RANGE,
            millimeters: 8190,
        }));
    }

    pub fn push_error(&mut self) {
        self.script.push_back(Err(SensorError::I2cReadFailed));
    }

    pub fn last_call(&self) -> Option<&ActuatorCall> {
        self.calls.last()
    }

    pub fn valve_open(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetAirValve(open) => Some(*open),
                ActuatorCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn buzzer_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetBuzzer(on) => Some(*on),
                ActuatorCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn valve_openings(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| **c == ActuatorCall::SetAirValve(true))
            .count()
    }

    /// Every colour the LED was set to, in order.
    pub fn led_history(&self) -> Vec<(u8, u8, u8)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ActuatorCall::SetLed { r, g, b } => Some((*r, *g, *b)),
                _ => None,
            })
            .collect()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl RangeFinderPort for MockHardware {
    fn begin(&mut self) -> Result<(), SensorError> {
        if self.boots {
            Ok(())
        } else {
            Err(SensorError::UnexpectedModelId(0x00))
        }
    }

    fn read_range(&mut self) -> Result<RangeMeasurement, SensorError> {
        self.range_reads += 1;
        if let Some(reply) = self.script.pop_front() {
            return reply;
        }
        Ok(match self.distance_mm {
            Some(millimeters) => RangeMeasurement {
                status: RANGE_STATUS_VALID,
                millimeters,
            },
            None => RangeMeasurement {
                status: RANGE_STATUS_OUT_OF_RANGE,
                millimeters: 8190,
            },
        })
    }
}

impl InputPort for MockHardware {
    fn disarm_switch_level(&mut self) -> bool {
        self.switch_level
    }

    fn range_pot_raw(&mut self) -> u16 {
        self.pot
    }
}

impl ActuatorPort for MockHardware {
    fn set_buzzer(&mut self, on: bool) {
        self.calls.push(ActuatorCall::SetBuzzer(on));
    }

    fn set_air_valve(&mut self, open: bool) {
        self.calls.push(ActuatorCall::SetAirValve(open));
    }

    fn set_led(&mut self, r: u8, g: u8, b: u8) {
        self.calls.push(ActuatorCall::SetLed { r, g, b });
    }

    fn all_off(&mut self) {
        self.calls.push(ActuatorCall::AllOff);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn puffs(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::PuffReleased { .. }))
            .count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
