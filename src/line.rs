//! The single data line shared by the MCU and the sensor.
//!
//! `embedded-hal` has no trait for reconfiguring a pin between input and
//! output, so [`DataLine`] adds that one capability on top of [`InputPin`] and
//! [`OutputPin`].

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

/// Direction of the data line.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// High impedance, the sensor drives the line.
    Input,
    /// The MCU drives the line.
    Output,
}

/// A bidirectional GPIO line that can switch direction at runtime.
pub trait DataLine: InputPin + OutputPin {
    /// Switches the line to `direction`.
    fn set_direction(&mut self, direction: Direction) -> Result<(), Self::Error>;
}

impl<T: DataLine + ?Sized> DataLine for &mut T {
    fn set_direction(&mut self, direction: Direction) -> Result<(), Self::Error> {
        T::set_direction(self, direction)
    }
}

/// Adapts an open-drain pin with a pull-up into a [`DataLine`].
///
/// Driving an open-drain pin high releases the line, and its level can be
/// read back at any time, so switching direction needs no reconfiguration.
pub struct OpenDrainLine<P> {
    pin: P,
}

impl<P> OpenDrainLine<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: ErrorType> ErrorType for OpenDrainLine<P> {
    type Error = P::Error;
}

impl<P: InputPin> InputPin for OpenDrainLine<P> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.pin.is_high()
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.pin.is_low()
    }
}

impl<P: OutputPin> OutputPin for OpenDrainLine<P> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low()
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.pin.set_high()
    }
}

impl<P: InputPin + OutputPin> DataLine for OpenDrainLine<P> {
    fn set_direction(&mut self, _direction: Direction) -> Result<(), Self::Error> {
        Ok(())
    }
}
