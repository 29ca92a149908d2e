//! SPI interface implementation built on top of `embedded-hal` `SpiDevice`.

use embedded_hal::spi::SpiDevice;

use super::Mcp23s17Interface;
use crate::config::BusConfig;

/// SPI-based interface implementation for the MCP23S17 driver.
pub struct SpiInterface<SPI> {
    spi: SPI,
    bus: BusConfig,
}

impl<SPI> SpiInterface<SPI> {
    /// Creates a new interface from the SPI device and the configuration it was set up with.
    ///
    /// `SpiDevice` does not expose its bus settings, so the caller reports them in `bus`.
    pub const fn new(spi: SPI, bus: BusConfig) -> Self {
        Self { spi, bus }
    }

    /// Provides mutable access to the wrapped SPI device.
    pub fn spi_mut(&mut self) -> &mut SPI {
        &mut self.spi
    }

    /// Consumes the interface and returns the owned SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> Mcp23s17Interface for SpiInterface<SPI>
where
    SPI: SpiDevice,
{
    type Error = SPI::Error;

    fn transfer(&mut self, frame: &mut [u8]) -> core::result::Result<(), Self::Error> {
        self.spi.transfer_in_place(frame)
    }

    fn bus_config(&self) -> BusConfig {
        self.bus
    }
}
