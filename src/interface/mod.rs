//! Bus interface abstraction for the MCP23S17 driver.

pub mod spi;

use crate::config::BusConfig;

/// Abstraction over the low-level bus access required by the driver.
pub trait Mcp23s17Interface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Clocks `frame` out while replacing it, byte for byte, with the bytes clocked in.
    ///
    /// The whole frame is exchanged under one chip-select assertion.
    fn transfer(&mut self, frame: &mut [u8]) -> core::result::Result<(), Self::Error>;

    /// Electrical configuration the bus was set up with.
    fn bus_config(&self) -> BusConfig;
}
