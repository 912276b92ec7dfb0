//! Distance zones.
//!
//! The range potentiometer sets the MEDIUM threshold directly in
//! millimetres (0–1023 raw = 0–1023 mm, no scaling); NEAR is half of it.
//! Thresholds are recomputed every tick with no hysteresis.

use crate::sensors::POT_RAW_MAX;
use crate::sensors::range::DistanceSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub medium_mm: u16,
    pub near_mm: u16,
}

impl Thresholds {
    /// Derive both thresholds from a raw potentiometer reading.
    /// Readings above full scale are clamped.
    pub fn from_pot(pot_raw: u16) -> Self {
        let medium_mm = pot_raw.min(POT_RAW_MAX);
        Self {
            medium_mm,
            near_mm: medium_mm / 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Far,
    Medium,
    Near,
}

impl Zone {
    /// Both MEDIUM and NEAR sound the warning buzzer: a subject close
    /// enough to be puffed is by definition also inside the medium radius.
    pub fn sounds_warning(self) -> bool {
        matches!(self, Self::Medium | Self::Near)
    }

    pub fn permits_actuation(self) -> bool {
        self == Self::Near
    }
}

/// Classify the held distance.  NEAR is checked first.
pub fn classify(sample: DistanceSample, thresholds: Thresholds) -> Zone {
    let d = sample.millimeters;
    if d <= thresholds.near_mm {
        Zone::Near
    } else if d <= thresholds.medium_mm {
        Zone::Medium
    } else {
        Zone::Far
    }
}
