//! Rate-limited distance sampler.
//!
//! Wraps any [`RangeFinderPort`] and queries it at most once per
//! `check_interval_ms`.  Between queries, and whenever the ranger has
//! nothing new to say (out-of-range status or a failed bus transaction),
//! the previously held distance is returned unchanged.
//!
//! The held value is seeded with a large distance at construction, so a
//! consumer never sees an uninitialised reading: before the first valid
//! sample the subject is "far away".

use log::{info, warn};

use crate::app::ports::{RANGE_STATUS_OUT_OF_RANGE, RangeFinderPort};
use crate::scheduler::Interval;

/// The most recent distance the sampler believes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceSample {
    pub millimeters: u16,
    /// `true` if the last ranger query produced this value; `false` for the
    /// startup seed or when the last query was discarded.
    pub valid: bool,
}

impl DistanceSample {
    pub const fn seed(millimeters: u16) -> Self {
        Self {
            millimeters,
            valid: false,
        }
    }
}

/// Result of one [`RangeSampler::sample`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleTick {
    pub sample: DistanceSample,
    /// A new valid reading replaced the held value on this call.
    pub fresh: bool,
}

pub struct RangeSampler {
    cadence: Interval,
    held: DistanceSample,
    read_failing: bool,
}

impl RangeSampler {
    pub fn new(check_interval_ms: u32, default_distance_mm: u16, now_ms: u32) -> Self {
        Self {
            cadence: Interval::new(check_interval_ms, now_ms),
            held: DistanceSample::seed(default_distance_mm),
            read_failing: false,
        }
    }

    /// Query the ranger if the cadence allows, otherwise return the held
    /// sample.  `last_sample_time` only advances when a query happens.
    pub fn sample(&mut self, now_ms: u32, ranger: &mut impl RangeFinderPort) -> SampleTick {
        if !self.cadence.poll(now_ms) {
            return SampleTick {
                sample: self.held,
                fresh: false,
            };
        }

        let fresh = match ranger.read_range() {
            Ok(m) => {
                if self.read_failing {
                    info!("Ranger reads recovered");
                    self.read_failing = false;
                }
                if m.status == RANGE_STATUS_OUT_OF_RANGE {
                    self.held.valid = false;
                    false
                } else {
                    self.held = DistanceSample {
                        millimeters: m.millimeters,
                        valid: true,
                    };
                    true
                }
            }
            Err(e) => {
                if !self.read_failing {
                    warn!("Ranger read failed ({}), holding {} mm", e, self.held.millimeters);
                    self.read_failing = true;
                }
                self.held.valid = false;
                false
            }
        };

        SampleTick {
            sample: self.held,
            fresh,
        }
    }

    /// The currently held sample, without touching the ranger.
    pub fn held(&self) -> DistanceSample {
        self.held
    }

    /// Uptime of the last ranger query (or of construction).
    pub fn last_sample_ms(&self) -> u32 {
        self.cadence.last_ms()
    }
}
