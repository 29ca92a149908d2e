//! High-level MCP23S17 device driver implementation.

use embedded_hal::spi::SpiDevice;

use crate::config::{BusConfig, ConfigWarning};
use crate::error::{Error, Result};
use crate::interface::spi::SpiInterface;
use crate::interface::Mcp23s17Interface;
use crate::operation::Operation;
use crate::params::{Bank, HardwareAddress, Port};
use crate::registers::{Iocon, Register};
use crate::transaction::{self, Response};

/// High-level synchronous driver for the MCP23S17 I/O expander.
///
/// `LINES` carries whatever the application wired to the chip besides the bus,
/// typically a [`ControlLines`](crate::lines::ControlLines). The driver stores
/// it and hands it back through [`Mcp23s17::lines_mut`] and [`Mcp23s17::release`].
pub struct Mcp23s17<IFACE, LINES = ()> {
    interface: IFACE,
    lines: LINES,
    address: HardwareAddress,
    warning: Option<ConfigWarning>,
}

impl<IFACE, LINES> Mcp23s17<IFACE, LINES> {
    // ==================================================================
    // == Driver Ownership ==============================================
    // ==================================================================
    /// Consumes the driver and returns the owned interface and lines.
    pub fn release(self) -> (IFACE, LINES) {
        (self.interface, self.lines)
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Provides shared access to the control lines.
    pub fn lines(&self) -> &LINES {
        &self.lines
    }

    /// Provides mutable access to the control lines.
    pub fn lines_mut(&mut self) -> &mut LINES {
        &mut self.lines
    }

    /// Hardware address every control byte is built with.
    pub fn hardware_address(&self) -> HardwareAddress {
        self.address
    }

    /// Non-fatal finding recorded while checking the bus configuration.
    pub fn config_warning(&self) -> Option<ConfigWarning> {
        self.warning
    }
}

impl<SPI, LINES> Mcp23s17<SpiInterface<SPI>, LINES>
where
    SPI: SpiDevice,
{
    // ==================================================================
    // == SPI Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for SPI transports.
    pub fn new_spi(
        spi: SPI,
        bus: BusConfig,
        hardware_address: u8,
        lines: LINES,
    ) -> Result<Self, SPI::Error> {
        Self::new(SpiInterface::new(spi, bus), hardware_address, lines)
    }

    /// Releases the driver, returning the SPI device and the control lines.
    pub fn release_spi(self) -> (SPI, LINES) {
        let (iface, lines) = self.release();
        (iface.release(), lines)
    }
}

impl<IFACE, LINES, CommE> Mcp23s17<IFACE, LINES>
where
    IFACE: Mcp23s17Interface<Error = CommE>,
{
    // ==================================================================
    // == Construction ==================================================
    // ==================================================================
    /// Creates a new driver after checking the address straps and bus configuration.
    ///
    /// Fails with [`Error::InvalidConfig`] naming the first offending parameter.
    /// Unknown bus flags are logged and kept in [`Mcp23s17::config_warning`].
    pub fn new(interface: IFACE, hardware_address: u8, lines: LINES) -> Result<Self, CommE> {
        let address = HardwareAddress::try_from(hardware_address)
            .map_err(Error::<CommE>::InvalidConfig)?;

        let bus = interface.bus_config();
        let warning = bus.validate().map_err(Error::<CommE>::InvalidConfig)?;
        if let Some(ConfigWarning::UnknownExtraFlags(flags)) = warning {
            warn!("mcp23s17: unknown SPI extra flags {:#x}", flags);
        }
        debug!("mcp23s17: bound at hardware address {}", address.value());

        Ok(Self {
            interface,
            lines,
            address,
            warning,
        })
    }

    // ==================================================================
    // == Transactions ==================================================
    // ==================================================================
    /// Runs `operations` back to back in one transfer and returns their replies in order.
    ///
    /// A transport failure only fails this call; the driver stays usable.
    pub fn operate(&mut self, operations: &[Operation<'_>]) -> Result<Response, CommE> {
        transaction::execute(&mut self.interface, self.address, operations)
    }

    /// Reads consecutive registers starting at `register` into `buf`.
    pub fn read_many(&mut self, register: u8, buf: &mut [u8]) -> Result<(), CommE> {
        let response = self.operate(&[Operation::read(register, buf.len())])?;
        if let Some(data) = response.read(0) {
            buf.copy_from_slice(data);
        }
        Ok(())
    }

    /// Writes `data` to consecutive registers starting at `register`.
    pub fn write_many(&mut self, register: u8, data: &[u8]) -> Result<(), CommE> {
        self.operate(&[Operation::write(register, data)])?;
        Ok(())
    }

    /// Reads a single register.
    pub fn read_register(&mut self, register: u8) -> Result<u8, CommE> {
        let mut value = [0u8; 1];
        self.read_many(register, &mut value)?;
        Ok(value[0])
    }

    /// Writes a single register.
    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), CommE> {
        self.write_many(register, core::slice::from_ref(&value))
    }

    // ==================================================================
    // == Catalog Helpers ===============================================
    // ==================================================================
    /// Reads `register` of `port` under the given bank layout.
    pub fn read_port(&mut self, register: Register, port: Port, bank: Bank) -> Result<u8, CommE> {
        self.read_register(register.address_for(port, bank))
    }

    /// Writes `register` of `port` under the given bank layout.
    pub fn write_port(
        &mut self,
        register: Register,
        port: Port,
        bank: Bank,
        value: u8,
    ) -> Result<(), CommE> {
        self.write_register(register.address_for(port, bank), value)
    }

    /// Reads `IOCON` at its address for the given bank layout.
    pub fn read_iocon(&mut self, bank: Bank) -> Result<Iocon, CommE> {
        self.read_port(Register::IOCON, Port::PortA, bank).map(Iocon::from)
    }

    /// Writes `IOCON` at its address for the given bank layout.
    pub fn write_iocon(&mut self, bank: Bank, iocon: Iocon) -> Result<(), CommE> {
        self.write_port(Register::IOCON, Port::PortA, bank, iocon.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BitOrder, ConfigError};
    use crate::lines::ControlLines;
    use embedded_hal::spi::MODE_2;
    use embedded_hal_mock::eh1::digital::Mock as PinMock;
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    fn full_duplex(outbound: Vec<u8>, inbound: Vec<u8>) -> [SpiTransaction<u8>; 3] {
        [
            SpiTransaction::transaction_start(),
            SpiTransaction::transfer_in_place(outbound, inbound),
            SpiTransaction::transaction_end(),
        ]
    }

    #[test]
    fn write_register_matches_wire_contract() {
        let expectations = full_duplex(vec![0x44, 0x00, 0xFF], vec![0x00, 0x00, 0x00]);
        let spi = SpiMock::new(&expectations);
        let mut device = Mcp23s17::new_spi(spi, BusConfig::default(), 2, ()).unwrap();

        device.write_register(0x00, 0xFF).unwrap();

        let (mut spi, ()) = device.release_spi();
        spi.done();
    }

    #[test]
    fn read_register_returns_payload_byte() {
        let expectations = full_duplex(vec![0x45, 0x09, 0xFF], vec![0x00, 0x00, 0xAB]);
        let spi = SpiMock::new(&expectations);
        let mut device = Mcp23s17::new_spi(spi, BusConfig::default(), 2, ()).unwrap();

        assert_eq!(device.read_register(0x09).unwrap(), 0xAB);

        let (mut spi, ()) = device.release_spi();
        spi.done();
    }

    #[test]
    fn operate_batches_under_one_chip_select() {
        let expectations = full_duplex(
            vec![0x40, 0x0A, 0x20, 0x41, 0x12, 0xFF, 0xFF],
            vec![0x00, 0x00, 0x00, 0x00, 0x00, 0x3C, 0xC3],
        );
        let spi = SpiMock::new(&expectations);
        let mut device = Mcp23s17::new_spi(spi, BusConfig::default(), 0, ()).unwrap();

        let response = device
            .operate(&[Operation::write(0x0A, &[0x20]), Operation::read(0x12, 2)])
            .unwrap();
        assert_eq!(response.get(0), Some(None));
        assert_eq!(response.read(1), Some(&[0x3C, 0xC3][..]));

        let (mut spi, ()) = device.release_spi();
        spi.done();
    }

    #[test]
    fn read_many_fills_buffer() {
        let expectations = full_duplex(
            vec![0x4F, 0x00, 0xFF, 0xFF, 0xFF],
            vec![0x00, 0x00, 0x01, 0x02, 0x03],
        );
        let spi = SpiMock::new(&expectations);
        let mut device = Mcp23s17::new_spi(spi, BusConfig::default(), 7, ()).unwrap();

        let mut buf = [0u8; 3];
        device.read_many(0x00, &mut buf).unwrap();
        assert_eq!(buf, [0x01, 0x02, 0x03]);

        let (mut spi, ()) = device.release_spi();
        spi.done();
    }

    #[test]
    fn port_helpers_use_bank_addressing() {
        let mut expectations = Vec::new();
        expectations.extend(full_duplex(vec![0x40, 0x13, 0x0F], vec![0x00, 0x00, 0x00]));
        expectations.extend(full_duplex(vec![0x41, 0x19, 0xFF], vec![0x00, 0x00, 0x55]));
        let spi = SpiMock::new(&expectations);
        let mut device = Mcp23s17::new_spi(spi, BusConfig::default(), 0, ()).unwrap();

        device
            .write_port(Register::GPIO, Port::PortB, Bank::Interleaved, 0x0F)
            .unwrap();
        let value = device
            .read_port(Register::GPIO, Port::PortB, Bank::Separated)
            .unwrap();
        assert_eq!(value, 0x55);

        let (mut spi, ()) = device.release_spi();
        spi.done();
    }

    #[test]
    fn iocon_round_trips_through_the_bus() {
        let mut expectations = Vec::new();
        expectations.extend(full_duplex(vec![0x40, 0x0A, 0x08], vec![0x00, 0x00, 0x00]));
        expectations.extend(full_duplex(vec![0x41, 0x0A, 0xFF], vec![0x00, 0x00, 0x08]));
        let spi = SpiMock::new(&expectations);
        let mut device = Mcp23s17::new_spi(spi, BusConfig::default(), 0, ()).unwrap();

        device
            .write_iocon(Bank::Interleaved, Iocon::new().with_haen(true))
            .unwrap();
        let iocon = device.read_iocon(Bank::Interleaved).unwrap();
        assert!(iocon.haen());
        assert_eq!(iocon.bank_layout(), Bank::Interleaved);

        let (mut spi, ()) = device.release_spi();
        spi.done();
    }

    #[test]
    fn construction_rejects_incompatible_bus() {
        let cases = [
            (BusConfig::new().mode(MODE_2).build(), ConfigError::ClockMode),
            (BusConfig::new().max_frequency_hz(10_000_001).build(), ConfigError::ClockRate),
            (BusConfig::new().bit_order(BitOrder::LsbFirst).build(), ConfigError::BitOrder),
            (BusConfig::new().word_bits(16).build(), ConfigError::WordSize),
        ];

        for (bus, expected) in cases {
            let spi = SpiMock::new(&[]);
            let result = Mcp23s17::new_spi(spi.clone(), bus, 0, ());
            assert!(matches!(result, Err(Error::InvalidConfig(err)) if err == expected));
            let mut spi = spi;
            spi.done();
        }
    }

    #[test]
    fn construction_rejects_wide_hardware_address() {
        let spi = SpiMock::new(&[]);
        let result = Mcp23s17::new_spi(spi.clone(), BusConfig::default(), 8, ());
        assert!(matches!(
            result,
            Err(Error::InvalidConfig(ConfigError::HardwareAddress))
        ));
        let mut spi = spi;
        spi.done();
    }

    #[test]
    fn extra_flags_are_kept_as_warning() {
        let spi = SpiMock::new(&[]);
        let bus = BusConfig::new().extra_flags(0x20).build();
        let device = Mcp23s17::new_spi(spi, bus, 3, ()).unwrap();

        assert_eq!(
            device.config_warning(),
            Some(ConfigWarning::UnknownExtraFlags(0x20))
        );
        assert_eq!(device.hardware_address().value(), 3);

        let (mut spi, ()) = device.release_spi();
        spi.done();
    }

    #[test]
    fn lines_are_stored_untouched() {
        let spi = SpiMock::new(&[]);
        let lines = ControlLines::new(
            PinMock::new(&[]),
            PinMock::new(&[]),
            PinMock::new(&[]),
            |_port: Port| {},
        );
        let device = Mcp23s17::new_spi(spi, BusConfig::default(), 0, lines).unwrap();
        assert!(device.config_warning().is_none());

        let (mut spi, lines) = device.release_spi();
        spi.done();
        let (mut reset, mut inta, mut intb, _) = lines.release();
        reset.done();
        inta.done();
        intb.done();
    }
}
