use embedded_hal::delay::DelayNs;

use crate::config::{Config, RetryBudget};
use crate::error::{DhtError, SensorStatus};
use crate::line::{DataLine, Direction};
use crate::reading::{RawFrame, RawReading, Reading};

/// Driver for the DHT11 temperature and humidity sensor.
pub struct Dht11<LINE, D> {
    line: LINE,
    delay: D,
    config: Config,
    status: SensorStatus,
}

impl<LINE, DELAY, E> Dht11<LINE, DELAY>
where
    LINE: DataLine<Error = E>,
    DELAY: DelayNs,
{
    /// Creates a new instance of the DHT11 driver with the default timings.
    ///
    /// # Arguments
    ///
    /// * `line` - The GPIO line connected to the DHT11 data pin. Must support both input and output.
    /// * `delay` - A delay provider implementing the `DelayNs` trait.
    pub fn new(line: LINE, delay: DELAY) -> Self {
        Self::with_config(line, delay, Config::default())
    }

    /// Creates a new instance of the DHT11 driver with custom timings and bounds.
    pub fn with_config(line: LINE, delay: DELAY, config: Config) -> Self {
        Dht11 {
            line,
            delay,
            config,
            status: SensorStatus::Ok,
        }
    }

    /// The configuration this driver was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Status recorded by the most recent read.
    pub fn status(&self) -> SensorStatus {
        self.status
    }

    /// Releases the line and the delay provider.
    pub fn release(self) -> (LINE, DELAY) {
        (self.line, self.delay)
    }

    /// Waits out the sensor's power-up settle time.
    ///
    /// Call once after power-up, before the first read.
    pub fn initialize(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::debug!("settling for {} ms", self.config.settle_delay_ms);
        self.delay.delay_ms(self.config.settle_delay_ms);
        self.status = SensorStatus::Ok;
    }

    /// Reads a calibrated temperature and humidity measurement.
    ///
    /// This performs the complete DHT11 transaction: request, handshake,
    /// 5 data bytes, checksum, then bound checks and unit conversion.
    ///
    /// # Returns
    ///
    /// * `Ok(Reading)` if every stage succeeds and both values are plausible.
    /// * `Err(DhtError)` for the first stage that fails. [`status`](Self::status)
    ///   reports the same outcome afterwards.
    pub fn read(&mut self) -> Result<Reading, DhtError<E>> {
        self.status = SensorStatus::Ok;
        let outcome = self
            .acquire()
            .and_then(|raw| raw.calibrate(&self.config));
        self.record(outcome)
    }

    /// Reads the raw counts from a checksum-valid frame, without bounds or
    /// unit conversion.
    pub fn read_raw(&mut self) -> Result<RawReading, DhtError<E>> {
        self.status = SensorStatus::Ok;
        let outcome = self.acquire();
        self.record(outcome)
    }

    /// Runs a full [`read`](Self::read) and keeps only the temperature.
    pub fn read_temperature(&mut self) -> Result<f32, DhtError<E>> {
        self.read().map(|reading| reading.temperature)
    }

    /// Runs a full [`read`](Self::read) and keeps only the humidity.
    pub fn read_humidity(&mut self) -> Result<f32, DhtError<E>> {
        self.read().map(|reading| reading.humidity)
    }

    fn acquire(&mut self) -> Result<RawReading, DhtError<E>> {
        self.request_data()?;
        self.await_response()?;

        let mut frame = RawFrame::default();
        self.receive_frame(&mut frame)?;
        #[cfg(feature = "defmt")]
        defmt::debug!("received frame {}", frame);

        frame.validate()?;
        Ok(frame.raw_reading())
    }

    fn record<T>(&mut self, outcome: Result<T, DhtError<E>>) -> Result<T, DhtError<E>> {
        self.status = match &outcome {
            Ok(_) => SensorStatus::Ok,
            Err(err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("read failed: {}", err.status());
                err.status()
            }
        };
        outcome
    }

    /// Sends the start request to the DHT11.
    ///
    /// Drives the line low for the request pulse, releases it high and hands
    /// the line over to the sensor by switching it to input.
    pub fn request_data(&mut self) -> Result<(), DhtError<E>> {
        self.line.set_direction(Direction::Output)?;
        self.line.set_low()?;
        self.delay.delay_ms(self.config.request_pulse_ms);
        self.line.set_high()?;
        self.line.set_direction(Direction::Input)?;
        Ok(())
    }

    /// Waits for the sensor's acknowledge and ready pulses.
    ///
    /// Each phase has its own retry budget. The first phase to run out
    /// returns `DhtError::Timeout` and the remaining phases are skipped.
    pub fn await_response(&mut self) -> Result<(), DhtError<E>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("waiting for acknowledge");
        self.wait_for_low(self.config.ack)?;
        #[cfg(feature = "defmt")]
        defmt::trace!("waiting for ready pulse");
        self.wait_for_high(self.config.ready)?;
        self.wait_for_low(self.config.ready_end)?;
        Ok(())
    }

    /// Receives all 5 bytes into `frame`.
    ///
    /// Bytes are filled in place, so after a timeout `frame` still holds
    /// every bit decoded up to that point.
    pub fn receive_frame(&mut self, frame: &mut RawFrame) -> Result<(), DhtError<E>> {
        for byte in frame.bytes_mut().iter_mut() {
            *byte = 0;
            self.receive_into(byte)?;
        }
        Ok(())
    }

    /// Reads one byte (8 bits, MSB first) from the sensor.
    pub fn receive_byte(&mut self) -> Result<u8, DhtError<E>> {
        let mut byte = 0;
        self.receive_into(&mut byte)?;
        Ok(byte)
    }

    fn receive_into(&mut self, byte: &mut u8) -> Result<(), DhtError<E>> {
        for i in 0..8 {
            let bit_mask = 1 << (7 - i);
            if self.sample_bit()? {
                *byte |= bit_mask;
            }
            self.wait_for_low(self.config.bit_end)?;
        }
        Ok(())
    }

    /// Waits for a bit's start edge and samples the line once after the
    /// sampling delay.
    ///
    /// A short high pulse has already ended by then and reads as 0. A long
    /// one is still high and reads as 1.
    fn sample_bit(&mut self) -> Result<bool, DhtError<E>> {
        self.wait_for_high(self.config.bit_start)?;
        self.delay.delay_ms(self.config.bit_sample_delay_ms);
        Ok(self.line.is_high()?)
    }

    fn wait_for_high(&mut self, budget: RetryBudget) -> Result<(), DhtError<E>> {
        Self::wait_for_state(&mut self.delay, budget, || self.line.is_high())
    }

    fn wait_for_low(&mut self, budget: RetryBudget) -> Result<(), DhtError<E>> {
        Self::wait_for_state(&mut self.delay, budget, || self.line.is_low())
    }

    /// Polls `condition` until it holds or `budget` is exhausted.
    ///
    /// # Errors
    ///
    /// Returns `DhtError::Timeout` after `budget.polls` failed checks. The
    /// line is always checked at least once, even for an empty budget.
    fn wait_for_state<F>(
        delay: &mut DELAY,
        budget: RetryBudget,
        mut condition: F,
    ) -> Result<(), DhtError<E>>
    where
        F: FnMut() -> Result<bool, E>,
    {
        for _ in 0..budget.polls.max(1) {
            if condition()? {
                return Ok(());
            }
            delay.delay_ms(budget.interval_ms);
        }
        Err(DhtError::Timeout)
    }
}
