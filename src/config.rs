//! Timing and plausibility settings for the driver.
//!
//! The DHT11 transmits microsecond-scale pulses, but this driver polls the line
//! at a coarse millisecond interval. Retry budgets are therefore counted in
//! polls rather than measured against a clock: a phase that runs out of polls
//! times out after `polls * interval_ms` milliseconds of waiting.

/// A bounded poll loop: check the line up to `polls` times, sleeping
/// `interval_ms` after each failed check.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryBudget {
    pub polls: u16,
    pub interval_ms: u32,
}

impl RetryBudget {
    /// Creates a budget of `polls` checks spaced `interval_ms` apart.
    pub const fn new(polls: u16, interval_ms: u32) -> Self {
        Self { polls, interval_ms }
    }

    /// Derives a poll count from a cumulative wait of `budget_ms`.
    ///
    /// The phase times out only once more than `budget_ms` has been slept,
    /// so the count is one past `budget_ms / interval_ms` and never zero.
    /// A zero interval is treated as 1 ms.
    pub const fn from_millis(budget_ms: u32, interval_ms: u32) -> Self {
        let step = if interval_ms == 0 { 1 } else { interval_ms };
        let polls = budget_ms / step;
        let polls = if polls >= u16::MAX as u32 {
            u16::MAX
        } else {
            polls as u16 + 1
        };
        Self {
            polls,
            interval_ms: step,
        }
    }

    /// Total time spent sleeping when every poll fails.
    pub const fn total_ms(&self) -> u32 {
        self.polls as u32 * self.interval_ms
    }
}

/// Inclusive range of plausible values.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: f32,
    pub max: f32,
}

impl Bounds {
    /// Creates a range from `min` to `max`, both inclusive.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies within the range.
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Unit of [`Reading::temperature`](crate::Reading::temperature).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TemperatureUnit {
    Celsius,
    #[default]
    Fahrenheit,
}

impl TemperatureUnit {
    /// Converts a temperature in degrees Celsius into this unit.
    pub fn convert(self, celsius: f32) -> f32 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => (celsius * 9.0 / 5.0) + 32.0,
        }
    }
}

const POLL_INTERVAL_MS: u32 = 2;

/// Driver configuration. Every field may be overridden.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Power-up settle time applied by [`Dht11::initialize`](crate::Dht11::initialize).
    pub settle_delay_ms: u32,
    /// How long the line is held low to request a measurement.
    pub request_pulse_ms: u32,
    /// Handshake phase 1: sensor pulls the line low.
    pub ack: RetryBudget,
    /// Handshake phase 2: sensor releases the line high.
    pub ready: RetryBudget,
    /// Handshake phase 3: sensor pulls the line low again before data.
    pub ready_end: RetryBudget,
    /// Start of each data bit (line goes high).
    pub bit_start: RetryBudget,
    /// End of each data bit (line returns low).
    pub bit_end: RetryBudget,
    /// Wait between a bit's start edge and the single sample that decides it.
    pub bit_sample_delay_ms: u32,
    /// Plausible temperature, in degrees Celsius as transmitted by the sensor.
    pub temperature_bounds: Bounds,
    /// Plausible relative humidity, in percent.
    pub humidity_bounds: Bounds,
    /// Unit of the reported temperature.
    pub unit: TemperatureUnit,
}

impl Config {
    /// Timings and bounds for a DHT11 polled every 2 ms.
    pub const DHT11: Self = Self {
        settle_delay_ms: 2000,
        request_pulse_ms: 100,
        ack: RetryBudget::from_millis(50, POLL_INTERVAL_MS),
        ready: RetryBudget::from_millis(100, POLL_INTERVAL_MS),
        ready_end: RetryBudget::from_millis(100, POLL_INTERVAL_MS),
        bit_start: RetryBudget::from_millis(70, POLL_INTERVAL_MS),
        bit_end: RetryBudget::from_millis(100, POLL_INTERVAL_MS),
        bit_sample_delay_ms: 35,
        temperature_bounds: Bounds::new(0.0, 50.0),
        humidity_bounds: Bounds::new(20.0, 90.0),
        unit: TemperatureUnit::Fahrenheit,
    };

    /// Returns this configuration reporting temperature in `unit`.
    pub const fn with_unit(mut self, unit: TemperatureUnit) -> Self {
        self.unit = unit;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DHT11
    }
}
