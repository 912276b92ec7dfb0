//! AirPuffer firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod pins;
pub mod scheduler;
pub mod sensors;

// Hardware-facing layers; the ESP-IDF paths are guarded by cfg
// attributes inside, the host paths are simulation stubs.
pub mod adapters;
pub mod drivers;
