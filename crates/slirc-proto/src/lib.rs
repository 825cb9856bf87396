//! # slirc-proto
//!
//! Client-side IRC protocol primitives: framing a byte stream into lines,
//! parsing lines into messages, CTCP, and encoding outbound commands.
//!
//! Everything here is sans-IO except the optional tokio codec, which plugs
//! into `tokio_util::codec::FramedRead` / `FramedWrite`.

#![deny(clippy::all)]
#![warn(missing_docs)]

//! ## Quick Start
//!
//! ### Parsing IRC Messages
//!
//! ```rust
//! use slirc_proto::Message;
//!
//! let message: Message = ":nick!user@host PRIVMSG #channel :Hello!".parse().unwrap();
//! assert_eq!(message.source_nick(), Some("nick"));
//! assert_eq!(message.params, vec!["#channel", "Hello!"]);
//! ```
//!
//! ### Building Commands
//!
//! ```rust
//! use slirc_proto::Command;
//!
//! let privmsg = Command::privmsg("#rust", "Hello, world!").unwrap();
//! assert_eq!(privmsg.to_string(), "PRIVMSG #rust :Hello, world!");
//!
//! // Empty required fields are refused rather than encoded.
//! assert!(Command::join("").is_err());
//! ```

pub mod casemap;
pub mod command;
pub mod ctcp;
pub mod error;
#[cfg(feature = "tokio")]
pub mod line;
pub mod message;
pub mod prefix;
pub mod response;

pub use self::casemap::{irc_eq, irc_lower_char, irc_to_lower};
pub use self::command::Command;
pub use self::ctcp::{Ctcp, CtcpKind, CTCP_DELIM};
pub use self::error::{EncodeError, MessageParseError, ProtocolError};
#[cfg(feature = "tokio")]
pub use self::line::{LineCodec, MAX_LINE_LEN};
pub use self::message::Message;
pub use self::prefix::PrefixRef;
pub use self::response::Response;
