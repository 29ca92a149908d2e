//! Per-operation framing on the MCP23S17 SPI wire.
//!
//! Every operation goes out as `[control, register, payload...]`. A read clocks
//! filler bytes through the payload window so the chip can shift the register
//! contents back; a write carries its data in that window.

use heapless::Vec;

use crate::params::{Direction, HardwareAddress};
use crate::registers::ControlByte;

/// Bytes preceding the payload window: control byte plus register address.
pub const HEADER_LEN: usize = 2;
/// Byte clocked out during a read's payload window.
pub const READ_FILLER: u8 = u8::MAX;

/// The encoded operation does not fit in the remaining frame capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOverflow;

/// A single register access within a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation<'a> {
    /// Read `count` consecutive bytes starting at `register`.
    Read {
        /// First register address.
        register: u8,
        /// Number of bytes to read.
        count: usize,
    },
    /// Write `data` to consecutive registers starting at `register`.
    Write {
        /// First register address.
        register: u8,
        /// Bytes to write.
        data: &'a [u8],
    },
}

/// Shape of an operation on the wire, detached from any payload borrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Framing {
    direction: Direction,
    payload_len: usize,
}

impl Framing {
    /// Direction bit the operation is sent with.
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Length of the payload window.
    pub const fn payload_len(&self) -> usize {
        self.payload_len
    }

    /// Total bytes on the wire for this operation.
    ///
    /// Saturates at `usize::MAX`, which no frame can hold.
    pub const fn transmitted_len(&self) -> usize {
        HEADER_LEN.saturating_add(self.payload_len)
    }

    /// Extracts the operation's result from its slice of the received frame.
    ///
    /// Reads yield the payload window with the header skipped; writes yield
    /// nothing. A read also yields nothing when `received` is shorter than
    /// [`Framing::transmitted_len`].
    pub fn parse<'r>(&self, received: &'r [u8]) -> Option<&'r [u8]> {
        match self.direction {
            Direction::Read => received.get(HEADER_LEN..self.transmitted_len()),
            Direction::Write => None,
        }
    }
}

impl<'a> Operation<'a> {
    /// Creates a read of `count` bytes starting at `register`.
    pub const fn read(register: u8, count: usize) -> Self {
        Self::Read { register, count }
    }

    /// Creates a write of `data` starting at `register`.
    pub const fn write(register: u8, data: &'a [u8]) -> Self {
        Self::Write { register, data }
    }

    /// First register address targeted by the operation.
    pub const fn register(&self) -> u8 {
        match *self {
            Self::Read { register, .. } | Self::Write { register, .. } => register,
        }
    }

    /// Wire shape of the operation.
    pub const fn framing(&self) -> Framing {
        match *self {
            Self::Read { count, .. } => Framing {
                direction: Direction::Read,
                payload_len: count,
            },
            Self::Write { data, .. } => Framing {
                direction: Direction::Write,
                payload_len: data.len(),
            },
        }
    }

    /// Total bytes on the wire for this operation.
    pub const fn transmitted_len(&self) -> usize {
        self.framing().transmitted_len()
    }

    /// Control byte addressing the device at `address` for this operation.
    pub fn control_byte(&self, address: HardwareAddress) -> u8 {
        ControlByte::for_device(address, self.framing().direction()).into()
    }

    /// Appends the operation's transmitted bytes to `frame`.
    ///
    /// Leaves `frame` untouched when the operation does not fit.
    pub fn encode_into<const N: usize>(
        &self,
        address: HardwareAddress,
        frame: &mut Vec<u8, N>,
    ) -> core::result::Result<(), FrameOverflow> {
        let end = frame
            .len()
            .checked_add(self.transmitted_len())
            .filter(|end| *end <= frame.capacity())
            .ok_or(FrameOverflow)?;

        let header = [self.control_byte(address), self.register()];
        frame
            .extend_from_slice(&header)
            .map_err(|_| FrameOverflow)?;

        match *self {
            Self::Read { .. } => frame.resize(end, READ_FILLER).map_err(|_| FrameOverflow),
            Self::Write { data, .. } => frame.extend_from_slice(data).map_err(|_| FrameOverflow),
        }
    }

    /// Extracts this operation's result from its slice of the received frame.
    pub fn parse<'r>(&self, received: &'r [u8]) -> Option<&'r [u8]> {
        self.framing().parse(received)
    }
}
