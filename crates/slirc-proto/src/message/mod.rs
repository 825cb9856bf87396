//! IRC message types and parsing.

mod parse;
mod serialize;
mod types;

pub(crate) use self::serialize::needs_colon_prefix;
pub use self::types::Message;
