/// Possible errors from the DHT11 driver.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq)]
pub enum DhtError<E> {
    /// Timed out waiting for a line transition.
    Timeout,
    /// Checksum did not match the received data.
    ChecksumMismatch,
    /// Frame was valid but the temperature is outside the plausible range.
    TemperatureOutOfRange,
    /// Frame was valid but the humidity is outside the plausible range.
    HumidityOutOfRange,
    /// Error from the GPIO pin (input/output).
    PinError(E),
}

impl<E> DhtError<E> {
    /// The status this error is reported as.
    pub fn status(&self) -> SensorStatus {
        match self {
            DhtError::Timeout => SensorStatus::Timeout,
            DhtError::ChecksumMismatch => SensorStatus::ChecksumMismatch,
            DhtError::TemperatureOutOfRange => SensorStatus::TemperatureOutOfRange,
            DhtError::HumidityOutOfRange => SensorStatus::HumidityOutOfRange,
            DhtError::PinError(_) => SensorStatus::PinFault,
        }
    }
}

impl<E> From<E> for DhtError<E> {
    fn from(value: E) -> Self {
        Self::PinError(value)
    }
}

/// Outcome of the most recent read attempt.
///
/// `Timeout` and `ChecksumMismatch` are transient; retry the whole read after
/// a cooldown. The out-of-range variants mean the frame arrived intact but the
/// values are implausible, so the caller decides whether to retry or alarm.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SensorStatus {
    /// The last read produced a valid reading.
    #[default]
    Ok,
    /// Humidity fell outside the configured bounds.
    HumidityOutOfRange,
    /// Temperature fell outside the configured bounds.
    TemperatureOutOfRange,
    /// Checksum did not match the received data.
    ChecksumMismatch,
    /// Timed out waiting for a line transition.
    Timeout,
    /// The HAL reported an error while driving or sampling the line.
    PinFault,
}

impl SensorStatus {
    /// Whether the last read succeeded.
    pub fn is_ok(self) -> bool {
        self == SensorStatus::Ok
    }

    /// Whether repeating the read may succeed without outside intervention.
    pub fn is_transient(self) -> bool {
        matches!(self, SensorStatus::Timeout | SensorStatus::ChecksumMismatch)
    }
}
