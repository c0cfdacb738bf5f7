use crate::config::Config;
use crate::error::DhtError;

/// Number of bytes in one DHT11 transmission.
pub const FRAME_LEN: usize = 5;

/// The 5 bytes received from the sensor:
/// `[humidity_int, humidity_frac, temperature_int, temperature_frac, checksum]`.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawFrame {
    bytes: [u8; FRAME_LEN],
}

impl RawFrame {
    pub const fn new(bytes: [u8; FRAME_LEN]) -> Self {
        Self { bytes }
    }

    pub fn bytes(&self) -> &[u8; FRAME_LEN] {
        &self.bytes
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8; FRAME_LEN] {
        &mut self.bytes
    }

    /// The checksum byte as transmitted.
    pub fn checksum(&self) -> u8 {
        self.bytes[4]
    }

    /// Truncated 8-bit sum of the four data bytes.
    pub fn expected_checksum(&self) -> u8 {
        self.bytes[..4]
            .iter()
            .fold(0u8, |sum, v| sum.wrapping_add(*v))
    }

    pub fn validate<E>(&self) -> Result<(), DhtError<E>> {
        if self.expected_checksum() != self.checksum() {
            Err(DhtError::ChecksumMismatch)
        } else {
            Ok(())
        }
    }

    /// Extracts the raw counts. Does not check the checksum.
    pub fn raw_reading(&self) -> RawReading {
        let [hum_int, hum_frac, temp_int, temp_frac, _] = self.bytes;

        // Bit 7 of the fractional temperature byte rounds the count up.
        let temperature = (temp_int & 0x7F) + ((temp_frac & 0x80) >> 7);

        RawReading {
            humidity: u16::from(hum_int) + u16::from(hum_frac),
            temperature,
        }
    }
}

/// Uncalibrated counts decoded from a valid frame.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawReading {
    /// Sum of the integral and fractional humidity bytes.
    pub humidity: u16,
    /// Temperature count in degrees Celsius.
    pub temperature: u8,
}

impl RawReading {
    /// Relative humidity in percent, `raw * 100 / 256`.
    pub fn humidity_percent(&self) -> f32 {
        (self.humidity as f32 * 100.0) / 256.0
    }

    pub fn temperature_celsius(&self) -> f32 {
        self.temperature as f32
    }

    /// Applies the plausibility bounds and unit conversion from `config`.
    ///
    /// The temperature bound is checked before humidity, and only the first
    /// violation is reported.
    pub fn calibrate<E>(&self, config: &Config) -> Result<Reading, DhtError<E>> {
        let celsius = self.temperature_celsius();
        if !config.temperature_bounds.contains(celsius) {
            return Err(DhtError::TemperatureOutOfRange);
        }

        let humidity = self.humidity_percent();
        if !config.humidity_bounds.contains(humidity) {
            return Err(DhtError::HumidityOutOfRange);
        }

        Ok(Reading {
            temperature: config.unit.convert(celsius),
            humidity,
        })
    }
}

/// Calibrated reading returned by the DHT11 driver.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    /// Temperature in the configured [`TemperatureUnit`](crate::TemperatureUnit).
    pub temperature: f32,
    /// Relative humidity in percent.
    pub humidity: f32,
}
