//! VL53L0X time-of-flight range finder over `embedded-hal` I²C.
//!
//! Implements [`RangeFinderPort`] for any bus implementing
//! [`embedded_hal::i2c::I2c`] (the ESP-IDF `I2cDriver` on target, an
//! in-memory register map in tests).
//!
//! `begin()` checks the model id, runs the data-init steps (2V8 I/O mode,
//! stop-variable handshake, limit checks, signal-rate limit) and starts
//! continuous back-to-back ranging.  `read_range()` picks up the newest
//! result if one is ready and clears the data-ready interrupt.
//!
//! ST's static init (SPAD selection, tuning register table) and the
//! VHV/phase reference calibration are not run.  The sensor ranges with
//! its power-on defaults, which costs accuracy and maximum range but not
//! the near/far ordering the controller relies on.
//!
//! ## Status mapping
//!
//! | Device condition                             | Reported status             |
//! |----------------------------------------------|-----------------------------|
//! | New result, phase fail (device status 6, 9)  | `RANGE_STATUS_OUT_OF_RANGE` |
//! | New result at or above the 8190 mm sentinel  | `RANGE_STATUS_OUT_OF_RANGE` |
//! | No new result since last read                | `RANGE_STATUS_OUT_OF_RANGE` |
//! | New result, any other device status          | `RANGE_STATUS_VALID`        |
//!
//! Sigma, signal, min-range and hardware failures still carry a usable
//! distance.  Min-range fail in particular is what a subject right in
//! front of the sensor produces, so it must not be dropped.

use embedded_hal::i2c::I2c;

use crate::app::ports::{
    RANGE_STATUS_OUT_OF_RANGE, RANGE_STATUS_VALID, RangeFinderPort, RangeMeasurement,
};
use crate::error::SensorError;

/// Factory-default 7-bit I²C address.
pub const DEFAULT_ADDRESS: u8 = 0x29;

const REG_SYSRANGE_START: u8 = 0x00;
const REG_SYSTEM_SEQUENCE_CONFIG: u8 = 0x01;
const REG_SYSTEM_INTERRUPT_CONFIG_GPIO: u8 = 0x0A;
const REG_SYSTEM_INTERRUPT_CLEAR: u8 = 0x0B;
const REG_RESULT_INTERRUPT_STATUS: u8 = 0x13;
const REG_RESULT_RANGE_STATUS: u8 = 0x14;
const REG_FINAL_RANGE_MIN_COUNT_RATE_RTN_LIMIT: u8 = 0x44;
const REG_MSRC_CONFIG_CONTROL: u8 = 0x60;
const REG_POWER_MANAGEMENT: u8 = 0x80;
const REG_I2C_MODE: u8 = 0x88;
const REG_VHV_CONFIG_PAD_SCL_SDA_EXTSUP_HV: u8 = 0x89;
const REG_STOP_VARIABLE: u8 = 0x91;
const REG_IDENTIFICATION_MODEL_ID: u8 = 0xC0;
const REG_PAGE_SELECT: u8 = 0xFF;

const MODEL_ID: u8 = 0xEE;
const SYSRANGE_MODE_BACK_TO_BACK: u8 = 0x02;
/// Interrupt on "new sample ready".
const GPIO_NEW_SAMPLE_READY: u8 = 0x04;
/// Disable the MSRC and pre-range signal-rate limit checks.
const MSRC_DISABLE_LIMIT_CHECKS: u8 = 0x12;
/// 0.25 MCPS in 9.7 fixed point.
const SIGNAL_RATE_LIMIT_Q9_7: u16 = 0x0020;
/// DSS, pre-range and final-range steps only.
const SEQUENCE_DEFAULT_STEPS: u8 = 0xE8;

const DEVICE_STATUS_PHASE_FAIL: [u8; 2] = [6, 9];
/// The device reports this (or more) when nothing is in the field of view.
const NO_TARGET_MM: u16 = 8190;

pub struct Vl53l0x<I2C> {
    i2c: I2C,
    address: u8,
    /// Read from the private page during `begin` and written back before
    /// every ranging start.
    stop_variable: u8,
}

impl<I2C: I2c> Vl53l0x<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            stop_variable: 0,
        }
    }

    /// Give the bus back (e.g. to share it after shutdown).
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn read_u8(&mut self, reg: u8) -> Result<u8, SensorError> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(|_| SensorError::I2cReadFailed)?;
        Ok(buf[0])
    }

    fn write_u8(&mut self, reg: u8, value: u8) -> Result<(), SensorError> {
        self.i2c
            .write(self.address, &[reg, value])
            .map_err(|_| SensorError::I2cWriteFailed)
    }

    fn write_u16(&mut self, reg: u8, value: u16) -> Result<(), SensorError> {
        let [hi, lo] = value.to_be_bytes();
        self.i2c
            .write(self.address, &[reg, hi, lo])
            .map_err(|_| SensorError::I2cWriteFailed)
    }

    /// Open the private register page, run `f`, close it again.
    fn with_private_page<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, SensorError>,
    ) -> Result<T, SensorError> {
        self.write_u8(REG_POWER_MANAGEMENT, 0x01)?;
        self.write_u8(REG_PAGE_SELECT, 0x01)?;
        self.write_u8(REG_SYSRANGE_START, 0x00)?;
        let out = f(self)?;
        self.write_u8(REG_SYSRANGE_START, 0x01)?;
        self.write_u8(REG_PAGE_SELECT, 0x00)?;
        self.write_u8(REG_POWER_MANAGEMENT, 0x00)?;
        Ok(out)
    }

    fn data_init(&mut self) -> Result<(), SensorError> {
        // 2V8 I/O levels.
        let vhv = self.read_u8(REG_VHV_CONFIG_PAD_SCL_SDA_EXTSUP_HV)?;
        self.write_u8(REG_VHV_CONFIG_PAD_SCL_SDA_EXTSUP_HV, vhv | 0x01)?;
        // Standard I²C mode.
        self.write_u8(REG_I2C_MODE, 0x00)?;

        self.stop_variable = self.with_private_page(|s| s.read_u8(REG_STOP_VARIABLE))?;

        let msrc = self.read_u8(REG_MSRC_CONFIG_CONTROL)?;
        self.write_u8(REG_MSRC_CONFIG_CONTROL, msrc | MSRC_DISABLE_LIMIT_CHECKS)?;
        self.write_u16(REG_FINAL_RANGE_MIN_COUNT_RATE_RTN_LIMIT, SIGNAL_RATE_LIMIT_Q9_7)?;

        self.write_u8(REG_SYSTEM_INTERRUPT_CONFIG_GPIO, GPIO_NEW_SAMPLE_READY)?;
        self.write_u8(REG_SYSTEM_INTERRUPT_CLEAR, 0x01)?;
        self.write_u8(REG_SYSTEM_SEQUENCE_CONFIG, SEQUENCE_DEFAULT_STEPS)?;
        Ok(())
    }

    fn start_continuous(&mut self) -> Result<(), SensorError> {
        let stop = self.stop_variable;
        self.with_private_page(|s| s.write_u8(REG_STOP_VARIABLE, stop))?;
        self.write_u8(REG_SYSRANGE_START, SYSRANGE_MODE_BACK_TO_BACK)
    }
}

/// Map a device range status and distance onto the port's status codes.
fn classify_result(device_status: u8, millimeters: u16) -> u8 {
    if DEVICE_STATUS_PHASE_FAIL.contains(&device_status) || millimeters >= NO_TARGET_MM {
        RANGE_STATUS_OUT_OF_RANGE
    } else {
        RANGE_STATUS_VALID
    }
}

impl<I2C: I2c> RangeFinderPort for Vl53l0x<I2C> {
    fn begin(&mut self) -> Result<(), SensorError> {
        let id = self.read_u8(REG_IDENTIFICATION_MODEL_ID)?;
        if id != MODEL_ID {
            return Err(SensorError::UnexpectedModelId(id));
        }
        self.data_init()?;
        self.start_continuous()
    }

    fn read_range(&mut self) -> Result<RangeMeasurement, SensorError> {
        let irq = self.read_u8(REG_RESULT_INTERRUPT_STATUS)?;
        if irq & 0x07 == 0 {
            return Ok(RangeMeasurement {
                status: RANGE_STATUS_OUT_OF_RANGE,
                millimeters: 0,
            });
        }

        // Status byte at +0, range (big-endian) at +10.
        let mut result = [0u8; 12];
        self.i2c
            .write_read(self.address, &[REG_RESULT_RANGE_STATUS], &mut result)
            .map_err(|_| SensorError::I2cReadFailed)?;
        self.write_u8(REG_SYSTEM_INTERRUPT_CLEAR, 0x01)?;

        let device_status = (result[0] & 0x78) >> 3;
        let millimeters = u16::from_be_bytes([result[10], result[11]]);

        Ok(RangeMeasurement {
            status: classify_result(device_status, millimeters),
            millimeters,
        })
    }
}
