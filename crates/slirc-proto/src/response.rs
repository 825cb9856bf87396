//! IRC numeric replies understood by the client.
//!
//! Only the numerics that drive client state are named here; every other
//! three-digit code parses to an error and is treated as an unknown command.
//!
//! # Reference
//! - RFC 2812 Section 5: Replies
//! - Modern IRC documentation: <https://modern.ircdocs.horse/>

#![allow(non_camel_case_types)]

use std::fmt;
use std::str::FromStr;

/// IRC server response code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
#[non_exhaustive]
pub enum Response {
    /// 001 - Welcome to the IRC network
    RPL_WELCOME = 1,
    /// 332 - Topic of the channel
    RPL_TOPIC = 332,
    /// 353 - One batch of nicknames present in a channel
    RPL_NAMREPLY = 353,
    /// 366 - End of a NAMES listing
    RPL_ENDOFNAMES = 366,
    /// 376 - End of the message of the day
    RPL_ENDOFMOTD = 376,
    /// 422 - Server has no message of the day
    ERR_NOMOTD = 422,
    /// 433 - Nickname is already in use
    ERR_NICKNAMEINUSE = 433,
}

/// Error returned when a command token is not a known numeric.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseResponseError;

impl fmt::Display for ParseResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("not a known numeric reply")
    }
}

impl std::error::Error for ParseResponseError {}

impl Response {
    /// Numeric value of the reply.
    #[inline]
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Look up a reply by its numeric value.
    pub fn from_code(code: u16) -> Option<Self> {
        Some(match code {
            1 => Self::RPL_WELCOME,
            332 => Self::RPL_TOPIC,
            353 => Self::RPL_NAMREPLY,
            366 => Self::RPL_ENDOFNAMES,
            376 => Self::RPL_ENDOFMOTD,
            422 => Self::ERR_NOMOTD,
            433 => Self::ERR_NICKNAMEINUSE,
            _ => return None,
        })
    }

    /// Whether this reply concludes the post-registration introduction.
    #[inline]
    pub fn is_end_of_motd(self) -> bool {
        matches!(self, Self::RPL_ENDOFMOTD | Self::ERR_NOMOTD)
    }
}

impl FromStr for Response {
    type Err = ParseResponseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 3 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseResponseError);
        }
        s.parse::<u16>()
            .ok()
            .and_then(Self::from_code)
            .ok_or(ParseResponseError)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.code())
    }
}
