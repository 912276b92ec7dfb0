//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                  |
//! |----------------|--------------------|------------------------------|
//! | `hardware`     | RangeFinderPort    | VL53L0X (any `I2c` bus)      |
//! |                | InputPort          | ESP32 GPIO, ADC              |
//! |                | ActuatorPort       | ESP32 GPIO, LEDC PWM         |
//! | `log_sink`     | EventSink          | Serial log output            |
//! | `time`         | (none)             | ESP32 system timer           |

pub mod hardware;
pub mod log_sink;
pub mod time;
