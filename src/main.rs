//! AirPuffer Firmware: Main Entry Point
//!
//! Hexagonal architecture with a single cooperative control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter<Vl53l0x<I2cDriver>>   LogEventSink   Esp32Time │
//! │  (RangeFinder+Input+Actuator)          (EventSink)   (uptime)  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Zone · Warning · Actuation · Indicator                │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use log::{error, info};

use airpuffer::adapters::hardware::HardwareAdapter;
use airpuffer::adapters::log_sink::LogEventSink;
use airpuffer::adapters::time::Esp32TimeAdapter;
use airpuffer::app::events::AppEvent;
use airpuffer::app::ports::EventSink;
use airpuffer::app::service::AppService;
use airpuffer::config::DeviceConfig;
use airpuffer::drivers::air_valve::AirValve;
use airpuffer::drivers::buzzer::Buzzer;
use airpuffer::drivers::hw_init;
use airpuffer::drivers::panel::OperatorPanel;
use airpuffer::drivers::status_led::StatusLed;
use airpuffer::pins;
use airpuffer::scheduler::Interval;
use airpuffer::sensors::vl53l0x::Vl53l0x;

/// VL53L0X boot time after XSHUT goes high.
const RANGER_BOOT_MS: u32 = 10;

/// Park the CPU forever.  Used when bring-up fails: outputs are already in
/// their safe state and there is nothing useful left to do.
fn halt() -> ! {
    loop {
        FreeRtos::delay_ms(1_000);
    }
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  AirPuffer v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = DeviceConfig::default();
    match serde_json::to_string(&config) {
        Ok(json) => info!("Config: {}", json),
        Err(e) => error!("Config not serialisable: {}", e),
    }

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        error!("HAL init failed: {}, halting", e);
        halt();
    }
    FreeRtos::delay_ms(RANGER_BOOT_MS);

    // ── 3. Range finder on I²C0 (SDA=GPIO14, SCL=GPIO15) ──────
    let peripherals = Peripherals::take()?;
    let i2c_config = I2cConfig::new().baudrate(Hertz(pins::I2C_FREQ_HZ));
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio14,
        peripherals.pins.gpio15,
        &i2c_config,
    )?;

    // ── 4. Construct adapters ─────────────────────────────────
    let mut hw = HardwareAdapter::new(
        Vl53l0x::new(i2c),
        OperatorPanel::default(),
        Buzzer::new(),
        AirValve::new(),
        StatusLed::new(),
    );
    let mut log_sink = LogEventSink::new();
    let clock = Esp32TimeAdapter::new();

    // ── 5. Construct app service ──────────────────────────────
    let mut app = match AppService::start(config.clone(), clock.uptime_ms(), &mut hw, &mut log_sink) {
        Ok(app) => app,
        Err(e) => {
            error!("Startup failed: {}, halting", e);
            halt();
        }
    };

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    let mut telemetry = Interval::new(config.telemetry_interval_ms, clock.uptime_ms());

    loop {
        let now_ms = clock.uptime_ms();
        app.tick(now_ms, &mut hw, &mut log_sink);

        if telemetry.poll(now_ms) {
            log_sink.emit(&AppEvent::Telemetry(app.build_telemetry()));
        }

        // Yield to the idle task so the task watchdog stays fed.
        FreeRtos::delay_ms(config.loop_period_ms);
    }
}
