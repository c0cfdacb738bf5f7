//! Pin and delay scripts shared by the unit tests.

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};
use embedded_hal_mock::eh1::delay::Transaction as DelayTx;
use embedded_hal_mock::eh1::digital::{Mock as PinMock, State as PinState, Transaction as PinTx};

use crate::config::{Config, RetryBudget};
use crate::line::{DataLine, Direction};

/// Default config with the data-phase sample delay kept, but tiny retry
/// budgets so timeout scripts stay short.
pub fn short_config() -> Config {
    let mut config = Config::default();
    config.ack = RetryBudget::new(3, 2);
    config.ready = RetryBudget::new(4, 2);
    config.ready_end = RetryBudget::new(4, 2);
    config.bit_start = RetryBudget::new(3, 2);
    config.bit_end = RetryBudget::new(4, 2);
    config
}

/// MCU pulls the line low then releases it.
pub fn request_sequence() -> Vec<PinTx> {
    vec![PinTx::set(PinState::Low), PinTx::set(PinState::High)]
}

/// Sensor acknowledges, signals ready, then drops low before the first bit.
pub fn handshake_sequence() -> Vec<PinTx> {
    vec![
        PinTx::get(PinState::Low),
        PinTx::get(PinState::High),
        PinTx::get(PinState::Low),
    ]
}

/// One bit with every edge arriving on the first poll.
pub fn encode_bit(bit: bool) -> Vec<PinTx> {
    vec![
        PinTx::get(PinState::High), // start of bit
        PinTx::get(if bit { PinState::High } else { PinState::Low }), // sample
        PinTx::get(PinState::Low),  // end of bit
    ]
}

/// Encodes one byte into 8 bits (MSB first).
pub fn encode_byte(byte: u8) -> Vec<PinTx> {
    (0..8)
        .flat_map(|i| encode_bit((byte >> (7 - i)) & 1 == 1))
        .collect()
}

/// Complete pin script for one successful transaction carrying `bytes`.
pub fn read_sequence(bytes: [u8; 5]) -> Vec<PinTx> {
    let mut pin_states = request_sequence();
    pin_states.extend(handshake_sequence());
    for byte in bytes {
        pin_states.extend(encode_byte(byte));
    }
    pin_states
}

/// Delays for one read where every edge arrives on the first poll.
pub fn read_delays(config: &Config) -> Vec<DelayTx> {
    let mut delays = vec![DelayTx::delay_ms(config.request_pulse_ms)];
    delays.extend(std::iter::repeat_n(
        DelayTx::delay_ms(config.bit_sample_delay_ms),
        40,
    ));
    delays
}

/// Appends a checksum byte to four data bytes.
pub fn with_checksum(data: [u8; 4]) -> [u8; 5] {
    let sum = data.iter().fold(0u8, |sum, v| sum.wrapping_add(*v));
    [data[0], data[1], data[2], data[3], sum]
}

/// A data line over a pin mock that also records direction changes.
pub struct TrackedLine {
    pub pin: PinMock,
    pub directions: Vec<Direction>,
}

impl TrackedLine {
    pub fn new(pin: PinMock) -> Self {
        Self {
            pin,
            directions: Vec::new(),
        }
    }
}

impl ErrorType for TrackedLine {
    type Error = <PinMock as ErrorType>::Error;
}

impl InputPin for TrackedLine {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.pin.is_high()
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.pin.is_low()
    }
}

impl OutputPin for TrackedLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low()
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.pin.set_high()
    }
}

impl DataLine for TrackedLine {
    fn set_direction(&mut self, direction: Direction) -> Result<(), Self::Error> {
        self.directions.push(direction);
        Ok(())
    }
}

/// A line whose driver has failed: every access reports an error.
pub struct BrokenLine;

impl ErrorType for BrokenLine {
    type Error = ErrorKind;
}

impl InputPin for BrokenLine {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Err(ErrorKind::Other)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Err(ErrorKind::Other)
    }
}

impl OutputPin for BrokenLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }
}

impl DataLine for BrokenLine {
    fn set_direction(&mut self, _direction: Direction) -> Result<(), Self::Error> {
        Ok(())
    }
}
