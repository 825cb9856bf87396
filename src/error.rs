//! Error hierarchy for the client.
//!
//! Nothing here is fatal once the client is running: connection failures,
//! malformed server traffic and bad local input all end up as status lines.
//! Only configuration errors stop the binary.

use slirc_proto::{EncodeError, ProtocolError};
use std::io;
use thiserror::Error;

// ============================================================================
// Connection Errors
// ============================================================================

/// Failure to open a connection to a server.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("could not resolve {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: io::Error,
    },

    #[error("no address found for {0}")]
    NoAddress(String),

    #[error("connection refused by {0}")]
    Refused(String),

    #[error("timed out connecting to {0}")]
    Timeout(String),

    #[error("connection to {addr} failed: {source}")]
    Io {
        addr: String,
        #[source]
        source: io::Error,
    },
}

// ============================================================================
// Session Errors (local requests in the wrong state)
// ============================================================================

/// A local request that the current session state does not allow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("already connected")]
    AlreadyConnected,

    #[error("not connected")]
    NotConnected,

    #[error("not in a channel")]
    NotJoined,

    #[error("already in a channel ({0})")]
    AlreadyJoined(String),
}

// ============================================================================
// Usage Errors (local input)
// ============================================================================

/// Malformed local input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("port must be specified as an integer, got {0:?}")]
    InvalidPort(String),

    #[error("nothing to repeat")]
    NothingToRepeat,
}

// ============================================================================
// Dispatch Errors (malformed server traffic)
// ============================================================================

/// A server message with the right command but the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("{command}: expected at least {needed} parameters, got {got}")]
    NeedMoreParams {
        command: &'static str,
        needed: usize,
        got: usize,
    },

    #[error("{command}: parameter {index} is empty")]
    EmptyParam { command: &'static str, index: usize },

    #[error("{0}: message has no origin nick")]
    MissingOrigin(&'static str),

    #[error("CTCP message without a command")]
    EmptyCtcp,

    #[error("could not build reply: {0}")]
    Reply(#[from] EncodeError),
}

impl DispatchError {
    /// Get a static error code string for log fields.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NeedMoreParams { .. } => "need_more_params",
            Self::EmptyParam { .. } => "empty_param",
            Self::MissingOrigin(_) => "missing_origin",
            Self::EmptyCtcp => "empty_ctcp",
            Self::Reply(_) => "reply_encode",
        }
    }
}

// ============================================================================
// Client Errors (anything a local request can fail with)
// ============================================================================

/// Failure of a local request against the client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error("write to server failed: {0}")]
    Write(#[source] ProtocolError),
}
