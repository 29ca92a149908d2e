//! Strongly typed parameters for the MCP23S17 driver.
//!
//! These types map directly to datasheet encodings and are used across the
//! register catalog, the operation encoder and the high-level driver APIs.
//!
//! # Examples
//!
//! ```rust
//! use mcp23s17::params::{Bank, HardwareAddress, Port};
//!
//! let address = HardwareAddress::new(0b010).unwrap();
//! let port = Port::PortB;
//! let bank = Bank::Interleaved;
//! let _ = (address, port, bank);
//! ```

use modular_bitfield::prelude::Specifier;

use crate::config::ConfigError;

/// Highest value the three `A2:A0` address straps can encode.
pub const MAX_HARDWARE_ADDRESS: u8 = 0b111;

/// The two 8-bit GPIO ports of the expander.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    /// `GPA7:GPA0`, signalled on `INTA`.
    PortA,
    /// `GPB7:GPB0`, signalled on `INTB`.
    PortB,
}

/// Register address layout selected by `IOCON.BANK`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bank {
    /// `BANK = 0`: port A and port B registers alternate (power-on default).
    Interleaved,
    /// `BANK = 1`: port A registers at `0x00..=0x0A`, port B at `0x10..=0x1A`.
    Separated,
}

/// Direction bit carried in the control byte (`R/W`, bit 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum Direction {
    /// Host writes to the chip.
    Write = 0,
    /// Host reads from the chip.
    Read = 1,
}

/// Value of the `A2:A0` hardware address straps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HardwareAddress(u8);

impl HardwareAddress {
    /// Returns `None` when `value` does not fit in three bits.
    pub const fn new(value: u8) -> Option<Self> {
        if value > MAX_HARDWARE_ADDRESS {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Raw strap value, `0..=7`.
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for HardwareAddress {
    type Error = ConfigError;

    fn try_from(value: u8) -> core::result::Result<Self, Self::Error> {
        Self::new(value).ok_or(ConfigError::HardwareAddress)
    }
}

impl From<HardwareAddress> for u8 {
    fn from(value: HardwareAddress) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hardware_address_accepts_three_bit_values() {
        for value in 0..=MAX_HARDWARE_ADDRESS {
            assert_eq!(HardwareAddress::new(value).map(u8::from), Some(value));
        }
    }

    #[test]
    fn hardware_address_rejects_wider_values() {
        assert_eq!(HardwareAddress::new(8), None);
        assert_eq!(
            HardwareAddress::try_from(0xFF),
            Err(ConfigError::HardwareAddress)
        );
    }
}
