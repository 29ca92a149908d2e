//! Error handling primitives for the MCP23S17 driver.

use crate::config::ConfigError;

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Any error reported by the underlying bus interface.
    Interface(E),
    /// The bus or address configuration does not satisfy the chip's requirements.
    InvalidConfig(ConfigError),
    /// The encoded batch does not fit in a single transfer frame.
    FrameOverflow,
    /// The batch holds more operations than a single transaction can track.
    TooManyOperations,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Interface(err)
    }
}
