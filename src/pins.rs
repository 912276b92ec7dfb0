//! GPIO / peripheral pin assignments for the AirPuffer board.
//!
//! Every raw-GPIO driver references this module rather than hard-coding
//! pin numbers.  The I²C pair is the exception, see below.

// ---------------------------------------------------------------------------
// Warning buzzer (active buzzer, driven HIGH = on)
// ---------------------------------------------------------------------------

pub const BUZZER_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Air valve relay
// ---------------------------------------------------------------------------

/// Digital output driving the solenoid relay.  Active LOW: driving the pin
/// low energises the relay and opens the valve.
pub const AIR_RELAY_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Operator inputs
// ---------------------------------------------------------------------------

/// Disarm switch to ground, internal pull-up.  LOW = pressed = disarmed.
pub const DISARM_SWITCH_GPIO: i32 = 3;

/// Range potentiometer wiper.  ADC1 channel 3 (GPIO 4 on ESP32-S3).
pub const RANGE_POT_ADC_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Time-of-flight range finder (VL53L0X on I²C)
// ---------------------------------------------------------------------------

// SDA = GPIO 14, SCL = GPIO 15.  esp-idf-hal binds I²C pins by type, so
// main.rs takes `gpio14`/`gpio15` from `Peripherals` directly.

/// XSHUT enable line: HIGH = ranger powered.
pub const RANGER_XSHUT_GPIO: i32 = 8;
/// I²C bus clock for the ranger.
pub const I2C_FREQ_HZ: u32 = 400_000;

// ---------------------------------------------------------------------------
// Status LED (discrete RGB, common cathode)
// ---------------------------------------------------------------------------

pub const LED_R_GPIO: i32 = 9;
pub const LED_G_GPIO: i32 = 10;
pub const LED_B_GPIO: i32 = 11;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// LEDC frequency for RGB status LED (1 kHz).
pub const LED_PWM_FREQ_HZ: u32 = 1_000;
