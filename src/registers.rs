//! Register map definitions for the MCP23S17 I/O expander.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{Bank, Direction, HardwareAddress, Port};

/// Device family code occupying the upper nibble of every control byte.
pub const FIXED_BITS: u8 = 0b0100;
/// Bit offset of [`FIXED_BITS`] within the control byte.
pub const FIXED_BITS_OFFSET: u8 = 4;
/// Bit offset of the hardware address within the control byte.
pub const HARDWARE_ADDRESS_OFFSET: u8 = 1;
/// Bit offset of the read/write flag within the control byte.
pub const READ_OR_WRITE_BIT_OFFSET: u8 = 0;

// Distance between a port A register and its port B twin when BANK = 1.
const SEPARATED_PORT_B_OFFSET: u8 = 0x10;

/// Bitfield representation of the SPI control byte (`0 1 0 0 A2 A1 A0 R/W`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlByte {
    // Read/write flag (bit 0).
    pub direction: Direction,
    // Hardware address straps A2:A0 (bits 3:1).
    pub hardware_address: B3,
    // Device family code (bits 7:4).
    pub fixed: B4,
}

impl ControlByte {
    /// Builds the control byte addressing `address` in the given direction.
    pub fn for_device(address: HardwareAddress, direction: Direction) -> Self {
        Self::new()
            .with_fixed(FIXED_BITS)
            .with_hardware_address(address.value())
            .with_direction(direction)
    }
}

impl From<u8> for ControlByte {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<ControlByte> for u8 {
    fn from(value: ControlByte) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `IOCON` configuration register.
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Iocon {
    #[skip]
    __: B1,
    // INT output polarity, set = active-high (bit 1).
    pub intpol: bool,
    // INT configured as open-drain (bit 2).
    pub odr: bool,
    // Hardware address straps enabled (bit 3).
    pub haen: bool,
    // SDA slew rate control disabled (bit 4).
    pub disslw: bool,
    // Sequential operation disabled (bit 5).
    pub seqop: bool,
    // INTA and INTB internally connected (bit 6).
    pub mirror: bool,
    // Port registers split into separate banks (bit 7).
    pub bank: bool,
}

impl Iocon {
    /// Register layout selected by the `BANK` bit.
    pub fn bank_layout(self) -> Bank {
        if self.bank() {
            Bank::Separated
        } else {
            Bank::Interleaved
        }
    }
}

impl From<u8> for Iocon {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Iocon> for u8 {
    fn from(value: Iocon) -> Self {
        value.into_bytes()[0]
    }
}

/// Registers of one port, addressed as in the `BANK = 1` layout for port A.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// I/O direction.
    IODIR,
    /// Input polarity.
    IPOL,
    /// Interrupt-on-change enable.
    GPINTEN,
    /// Default compare value for interrupt-on-change.
    DEFVAL,
    /// Interrupt-on-change control.
    INTCON,
    /// Expander configuration.
    IOCON,
    /// Pull-up resistor enable.
    GPPU,
    /// Interrupt flags.
    INTF,
    /// Interrupt capture.
    INTCAP,
    /// Port value.
    GPIO,
    /// Output latch.
    OLAT,
}

struct RegisterInfo {
    address: u8,
    bits: [&'static str; 8],
}

// Indexed by `Register as usize`; bit names are listed bit 0 first.
static CATALOG: [RegisterInfo; 11] = [
    RegisterInfo { address: 0x00, bits: ["IO0", "IO1", "IO2", "IO3", "IO4", "IO5", "IO6", "IO7"] },
    RegisterInfo { address: 0x01, bits: ["IP0", "IP1", "IP2", "IP3", "IP4", "IP5", "IP6", "IP7"] },
    RegisterInfo {
        address: 0x02,
        bits: ["GPINT0", "GPINT1", "GPINT2", "GPINT3", "GPINT4", "GPINT5", "GPINT6", "GPINT7"],
    },
    RegisterInfo {
        address: 0x03,
        bits: ["DEF0", "DEF1", "DEF2", "DEF3", "DEF4", "DEF5", "DEF6", "DEF7"],
    },
    RegisterInfo {
        address: 0x04,
        bits: ["IOC0", "IOC1", "IOC2", "IOC3", "IOC4", "IOC5", "IOC6", "IOC7"],
    },
    RegisterInfo {
        address: 0x05,
        bits: ["UNIMPLEMENTED", "INTPOL", "ODR", "HAEN", "DISSLW", "SEQOP", "MIRROR", "BANK"],
    },
    RegisterInfo { address: 0x06, bits: ["PU0", "PU1", "PU2", "PU3", "PU4", "PU5", "PU6", "PU7"] },
    RegisterInfo {
        address: 0x07,
        bits: ["INT0", "INT1", "INT2", "INT3", "INT4", "INT5", "INT6", "INT7"],
    },
    RegisterInfo {
        address: 0x08,
        bits: ["ICP0", "ICP1", "ICP2", "ICP3", "ICP4", "ICP5", "ICP6", "ICP7"],
    },
    RegisterInfo { address: 0x09, bits: ["GP0", "GP1", "GP2", "GP3", "GP4", "GP5", "GP6", "GP7"] },
    RegisterInfo { address: 0x0A, bits: ["OL0", "OL1", "OL2", "OL3", "OL4", "OL5", "OL6", "OL7"] },
];

impl Register {
    /// Every register, in address order.
    pub const ALL: [Register; 11] = [
        Self::IODIR,
        Self::IPOL,
        Self::GPINTEN,
        Self::DEFVAL,
        Self::INTCON,
        Self::IOCON,
        Self::GPPU,
        Self::INTF,
        Self::INTCAP,
        Self::GPIO,
        Self::OLAT,
    ];

    fn info(self) -> &'static RegisterInfo {
        &CATALOG[self as usize]
    }

    /// Base address of the register (port A, `BANK = 1`).
    pub fn address(self) -> u8 {
        self.info().address
    }

    /// Names of the eight bits, bit 0 first.
    pub fn bit_names(self) -> &'static [&'static str; 8] {
        &self.info().bits
    }

    /// Bit position of the field called `name`, if the register has one.
    pub fn bit(self, name: &str) -> Option<u8> {
        self.bit_names()
            .iter()
            .position(|candidate| *candidate == name)
            .map(|index| index as u8)
    }

    /// Address of this register for `port` under the given bank layout.
    pub fn address_for(self, port: Port, bank: Bank) -> u8 {
        let base = self.address();
        match (bank, port) {
            (Bank::Separated, Port::PortA) => base,
            (Bank::Separated, Port::PortB) => base + SEPARATED_PORT_B_OFFSET,
            (Bank::Interleaved, Port::PortA) => base * 2,
            (Bank::Interleaved, Port::PortB) => base * 2 + 1,
        }
    }

    /// Looks a register up by its base address.
    pub fn from_address(address: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|register| register.address() == address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates the control byte layout for every address and direction.
    #[test]
    fn control_byte_layout_matches_datasheet() {
        for raw in 0..=7u8 {
            let address = HardwareAddress::new(raw).unwrap();
            for (direction, rw) in [(Direction::Read, 1u8), (Direction::Write, 0u8)] {
                let byte = u8::from(ControlByte::for_device(address, direction));
                assert_eq!(byte >> FIXED_BITS_OFFSET, FIXED_BITS);
                assert_eq!((byte >> HARDWARE_ADDRESS_OFFSET) & 0b111, raw);
                assert_eq!((byte >> READ_OR_WRITE_BIT_OFFSET) & 1, rw);
            }
        }
    }

    #[test]
    fn control_byte_decodes_fields() {
        let control = ControlByte::from(0x45);
        assert_eq!(control.fixed(), FIXED_BITS);
        assert_eq!(control.hardware_address(), 2);
        assert_eq!(control.direction(), Direction::Read);
    }

    #[test]
    fn iocon_layout_matches_datasheet() {
        let iocon = Iocon::from(0b1000_1010);
        assert!(iocon.bank());
        assert!(!iocon.mirror());
        assert!(!iocon.seqop());
        assert!(!iocon.disslw());
        assert!(iocon.haen());
        assert!(!iocon.odr());
        assert!(iocon.intpol());
        assert_eq!(iocon.bank_layout(), Bank::Separated);

        let encoded = Iocon::new().with_mirror(true).with_seqop(true);
        assert_eq!(u8::from(encoded), 0b0110_0000);
    }

    #[test]
    fn catalog_addresses_are_sequential() {
        for (index, register) in Register::ALL.iter().enumerate() {
            assert_eq!(register.address(), index as u8);
            assert_eq!(Register::from_address(index as u8), Some(*register));
        }
        assert_eq!(Register::from_address(0x0B), None);
    }

    #[test]
    fn bit_lookup_uses_register_specific_names() {
        assert_eq!(Register::GPIO.bit("GP5"), Some(5));
        assert_eq!(Register::IOCON.bit("HAEN"), Some(3));
        assert_eq!(Register::IOCON.bit("BANK"), Some(7));
        assert_eq!(Register::GPIO.bit("OL5"), None);
        assert_eq!(Register::OLAT.bit_names()[0], "OL0");
    }

    #[test]
    fn bank_addressing() {
        assert_eq!(Register::GPIO.address_for(Port::PortA, Bank::Separated), 0x09);
        assert_eq!(Register::GPIO.address_for(Port::PortB, Bank::Separated), 0x19);
        assert_eq!(Register::GPIO.address_for(Port::PortA, Bank::Interleaved), 0x12);
        assert_eq!(Register::GPIO.address_for(Port::PortB, Bank::Interleaved), 0x13);
        assert_eq!(Register::IOCON.address_for(Port::PortA, Bank::Interleaved), 0x0A);
        assert_eq!(Register::OLAT.address_for(Port::PortB, Bank::Interleaved), 0x15);
    }
}
