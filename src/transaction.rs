//! Batching of several operations into a single full-duplex transfer.
//!
//! All operations of a batch are encoded back to back into one frame, the frame
//! is exchanged with the chip in one transfer, and each operation's result is
//! cut out of the received frame at the offset it was transmitted at. Keeping
//! the batch in one transfer keeps chip select asserted across operations.

use heapless::Vec;

use crate::error::{Error, Result};
use crate::interface::Mcp23s17Interface;
use crate::operation::{Framing, Operation};
use crate::params::HardwareAddress;

/// Largest frame a single transaction can carry, in bytes.
pub const MAX_FRAME_LEN: usize = 64;
/// Largest number of operations a single transaction can carry.
pub const MAX_OPERATIONS: usize = 16;

/// Result of one operation: the bytes read, or `None` for a write.
pub type Reply<'r> = Option<&'r [u8]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    offset: usize,
    framing: Framing,
}

/// Received frame of a completed transaction together with the per-operation windows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    frame: Vec<u8, MAX_FRAME_LEN>,
    windows: Vec<Window, MAX_OPERATIONS>,
}

impl Response {
    const fn new() -> Self {
        Self {
            frame: Vec::new(),
            windows: Vec::new(),
        }
    }

    /// Number of operations in the transaction.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Returns `true` when the transaction carried no operations.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Reply of the operation at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<Reply<'_>> {
        self.windows.get(index).map(|window| self.decode(window))
    }

    /// Bytes read by the operation at `index`; `None` for writes and out-of-range indices.
    pub fn read(&self, index: usize) -> Option<&[u8]> {
        self.get(index).flatten()
    }

    /// Replies in the order the operations were submitted.
    pub fn iter(&self) -> impl Iterator<Item = Reply<'_>> + '_ {
        self.windows.iter().map(|window| self.decode(window))
    }

    /// Every byte received during the transfer, headers included.
    pub fn raw(&self) -> &[u8] {
        &self.frame
    }

    fn decode(&self, window: &Window) -> Reply<'_> {
        let received = self.frame.get(window.offset..)?;
        window.framing.parse(received)
    }
}

/// Runs `operations` as one transfer on `interface` and decodes the replies.
///
/// The bus is not touched when the batch is empty or does not fit in a frame.
pub fn execute<IFACE>(
    interface: &mut IFACE,
    address: HardwareAddress,
    operations: &[Operation<'_>],
) -> Result<Response, IFACE::Error>
where
    IFACE: Mcp23s17Interface,
{
    if operations.len() > MAX_OPERATIONS {
        return Err(Error::TooManyOperations);
    }

    let mut response = Response::new();
    for operation in operations {
        let offset = response.frame.len();
        operation
            .encode_into(address, &mut response.frame)
            .map_err(|_| Error::<IFACE::Error>::FrameOverflow)?;
        response
            .windows
            .push(Window {
                offset,
                framing: operation.framing(),
            })
            .map_err(|_| Error::<IFACE::Error>::TooManyOperations)?;
    }

    if response.frame.is_empty() {
        return Ok(response);
    }

    trace!(
        "mcp23s17: transferring {} bytes for {} operations",
        response.frame.len(),
        operations.len()
    );
    interface.transfer(&mut response.frame)?;

    Ok(response)
}
