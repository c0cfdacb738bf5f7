//! DHT11 Sensor Driver for Embedded Rust
//!
//! This crate provides a platform-agnostic driver for the DHT11 temperature
//! and humidity sensor, built on top of the [`embedded-hal`] traits.
//!
//! The DHT11 talks over a single data line. The MCU holds the line low to
//! request a measurement, then hands it to the sensor, which answers with a
//! handshake and 40 pulse-width encoded bits:
//!
//! ```text
//! [humidity_int, humidity_frac, temperature_int, temperature_frac, checksum]
//! ```
//!
//! # Features
//! - Blocking synchronous API using `embedded-hal` traits
//! - Designed for `no_std` environments
//! - Configurable timings, retry budgets and plausibility bounds
//! - Optional logging support via `defmt`
//!
//! # Dependencies
//! This driver depends on the following `embedded-hal` traits:
//! - [`InputPin`] and [`OutputPin`] for GPIO access, plus this crate's
//!   [`DataLine`] for switching the line direction
//! - [`DelayNs`] for timing
//!
//! # Usage
//!
//! ```ignore
//! let mut dht = Dht11::new(OpenDrainLine::new(pin), delay);
//! dht.initialize();
//!
//! match dht.read() {
//!     Ok(reading) => { /* reading.temperature, reading.humidity */ }
//!     Err(err) if err.status().is_transient() => { /* wait and retry */ }
//!     Err(_) => { /* implausible values or a pin fault */ }
//! }
//! ```
//!
//! # Optional Features
//! - `defmt`: Implements `defmt::Format` for logging support and emits driver logs
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//! [`InputPin`]: embedded_hal::digital::InputPin
//! [`OutputPin`]: embedded_hal::digital::OutputPin
//! [`DelayNs`]: embedded_hal::delay::DelayNs

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod dht11;
pub mod error;
pub mod line;
pub mod reading;

#[cfg(test)]
mod testing;

pub use config::{Bounds, Config, RetryBudget, TemperatureUnit};
pub use dht11::Dht11;
pub use error::{DhtError, SensorStatus};
pub use line::{DataLine, Direction, OpenDrainLine};
pub use reading::{RawFrame, RawReading, Reading};
