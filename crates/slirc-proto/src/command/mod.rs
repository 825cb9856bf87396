//! Outbound IRC commands and their encoding.

mod serialize;
mod types;
mod util;

pub use types::Command;
