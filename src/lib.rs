#![cfg_attr(not(test), no_std)]

//! Configuration surface for an ESP32-driven e-ink meeting room display.
//!
//! Parameters resolve through three layers, later layers winning for any
//! parameter they set: compiled-in defaults, build-time overrides from an
//! optional `cfg.toml` (merged by build.rs), and a runtime JSON document the
//! storage layer reads from the SD card. The result is a single immutable
//! [`Config`] built once at startup and handed to the Wi-Fi, rendering,
//! input and sleep subsystems.

pub mod config;
pub mod constants;
pub mod defaults;
pub mod display;
pub mod overrides;
pub mod power;

pub use config::{BuildConfig, Config, Error, BUILD_CONFIG};
pub use display::{Rotation, Shade};
pub use overrides::SdOverrides;
pub use power::Weekday;
