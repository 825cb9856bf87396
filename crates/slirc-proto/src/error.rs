//! Errors raised while framing, parsing and encoding lines.
//!
//! Parsing failures, outbound encoding failures and codec errors are kept
//! apart so callers can treat them differently: a bad inbound line is dropped,
//! a bad outbound command is a usage error reported to whoever built it.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Top-level protocol errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Illegal control character in an outgoing line.
    #[error("illegal control character: {0:?}")]
    IllegalControlChar(char),

    /// Failed to parse an IRC message.
    #[error("invalid message: {string:?}")]
    InvalidMessage {
        /// The invalid message string.
        string: String,
        /// The underlying parse error.
        #[source]
        cause: MessageParseError,
    },
}

/// Errors encountered when parsing IRC messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MessageParseError {
    /// Message was empty (or whitespace only).
    #[error("empty message")]
    EmptyMessage,

    /// Nothing followed the origin prefix, so there is no command token.
    #[error("missing command")]
    MissingCommand,
}

/// Errors raised when building an outbound command from invalid fields.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
    /// A required field was empty.
    #[error("missing {0}")]
    MissingField(&'static str),

    /// A field that must be a single token contained a space or started with `:`.
    #[error("{field} must be a single word: {value:?}")]
    NotAToken {
        /// Which field was rejected.
        field: &'static str,
        /// The offending value.
        value: String,
    },

    /// A field contained a line break or NUL, which would split the line.
    #[error("{field} contains illegal character {ch:?}")]
    IllegalChar {
        /// Which field was rejected.
        field: &'static str,
        /// The offending character.
        ch: char,
    },
}
