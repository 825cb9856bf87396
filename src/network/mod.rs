//! Network module.
//!
//! Contains the [`Connection`] (socket lifecycle and writes) and the frame
//! reader task that feeds it inbound lines.

mod connection;
mod reader;

pub use connection::{Connection, Poll};
pub use reader::{READ_CHUNK_SIZE, RawLine};
