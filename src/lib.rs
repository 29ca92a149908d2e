#![cfg_attr(not(test), no_std)]

#[macro_use]
mod log;

mod error;

pub mod config;
pub mod device;
pub mod interface;
pub mod lines;
pub mod operation;
pub mod params;
pub mod registers;
pub mod transaction;

pub use crate::device::Mcp23s17;
pub use crate::error::{Error, Result};
pub use crate::operation::Operation;
pub use crate::transaction::Response;
