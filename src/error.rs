//! Unified error types for the AirPuffer firmware.
//!
//! A single `Error` enum for the boot path, plus the `SensorError` the
//! range finder reports through its port.  Both are `Copy` so they can be
//! passed around without allocation.
//!
//! Almost nothing in this firmware is allowed to fail at runtime: an
//! unreadable range sample is "no new information", and the actuators have
//! no fault feedback.  The only fatal condition is ranger bring-up.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Startup errors returned by `AppService::start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed.  Fatal: the device halts.
    Init(&'static str),
    /// The build-time configuration is inconsistent.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// An I²C read transaction failed.
    I2cReadFailed,
    /// An I²C write transaction failed.
    I2cWriteFailed,
    /// The device at the ranger address is not a VL53L0X.
    UnexpectedModelId(u8),
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I2cReadFailed => write!(f, "I2C read failed"),
            Self::I2cWriteFailed => write!(f, "I2C write failed"),
            Self::UnexpectedModelId(id) => write!(f, "unexpected model id 0x{id:02X}"),
        }
    }
}

impl std::error::Error for Error {}
impl std::error::Error for SensorError {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
