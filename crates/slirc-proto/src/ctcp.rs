//! Client-to-client requests tunnelled through PRIVMSG.
//!
//! A CTCP body is `\x01COMMAND [params]\x01`. The client answers VERSION
//! and PING with a NOTICE to the sender and shows ACTION as an emote.
//!
//! ```
//! use slirc_proto::ctcp::{Ctcp, CtcpKind};
//!
//! let request = Ctcp::parse("\x01PING 1700000000\x01").unwrap();
//! assert_eq!(request.kind, CtcpKind::Ping);
//!
//! let reply = Ctcp::ping_reply(request.params);
//! assert_eq!(reply.to_string(), "\x01PING 1700000000\x01");
//! ```

use std::fmt;

/// Marks both ends of a CTCP body.
pub const CTCP_DELIM: char = '\x01';

/// Request kinds the client knows how to answer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CtcpKind {
    /// `/me` style emote.
    Action,
    /// Asks for the client name and version.
    Version,
    /// Latency probe; the payload is echoed back.
    Ping,
    /// Anything else, spelled as received.
    Unknown(String),
}

impl CtcpKind {
    const KNOWN: [(&'static str, CtcpKind); 3] = [
        ("ACTION", CtcpKind::Action),
        ("VERSION", CtcpKind::Version),
        ("PING", CtcpKind::Ping),
    ];

    /// Look up a command word, ignoring ASCII case.
    pub fn parse(word: &str) -> Self {
        Self::KNOWN
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(word))
            .map(|(_, kind)| kind.clone())
            .unwrap_or_else(|| Self::Unknown(word.to_string()))
    }

    /// Command word as sent on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unknown(word) => word.as_str(),
            known => Self::KNOWN
                .iter()
                .find(|(_, kind)| kind == known)
                .map_or("", |(name, _)| *name),
        }
    }
}

impl fmt::Display for CtcpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One CTCP request or reply, borrowing its parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ctcp<'a> {
    /// Command word.
    pub kind: CtcpKind,
    /// Everything after the command word, if non-empty.
    pub params: Option<&'a str>,
}

impl<'a> Ctcp<'a> {
    /// Decode a PRIVMSG body.
    ///
    /// `None` unless the body opens with [`CTCP_DELIM`] and carries a command
    /// word. A missing closing delimiter is tolerated.
    pub fn parse(body: &'a str) -> Option<Self> {
        let inner = body.strip_prefix(CTCP_DELIM)?;
        let inner = inner.strip_suffix(CTCP_DELIM).unwrap_or(inner);
        let inner = inner.trim_start_matches(' ');

        let mut parts = inner.splitn(2, ' ');
        let word = parts.next().filter(|w| !w.is_empty())?;
        let params = parts.next().filter(|p| !p.is_empty());

        Some(Self {
            kind: CtcpKind::parse(word),
            params,
        })
    }

    /// Cheap check before [`Ctcp::parse`].
    #[inline]
    pub fn is_ctcp(body: &str) -> bool {
        body.starts_with(CTCP_DELIM)
    }

    /// `/me` emote.
    pub fn action(text: &'a str) -> Self {
        Self {
            kind: CtcpKind::Action,
            params: Some(text),
        }
    }

    /// `VERSION <name and version>` answer.
    pub fn version_reply(version: &'a str) -> Self {
        Self {
            kind: CtcpKind::Version,
            params: Some(version),
        }
    }

    /// PING answer carrying the request's payload unchanged.
    pub fn ping_reply(payload: Option<&'a str>) -> Self {
        Self {
            kind: CtcpKind::Ping,
            params: payload,
        }
    }
}

impl fmt::Display for Ctcp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.params {
            Some(params) => write!(f, "{CTCP_DELIM}{} {params}{CTCP_DELIM}", self.kind),
            None => write!(f, "{CTCP_DELIM}{}{CTCP_DELIM}", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_kinds_any_case() {
        for (body, kind) in [
            ("\x01ACTION dances\x01", CtcpKind::Action),
            ("\x01version\x01", CtcpKind::Version),
            ("\x01Ping 42\x01", CtcpKind::Ping),
        ] {
            assert_eq!(Ctcp::parse(body).map(|c| c.kind), Some(kind), "{body:?}");
        }
    }

    #[test]
    fn test_params_split_at_first_space() {
        let ctcp = Ctcp::parse("\x01ACTION slaps bob around\x01").unwrap();
        assert_eq!(ctcp.params, Some("slaps bob around"));

        let bare = Ctcp::parse("\x01VERSION\x01").unwrap();
        assert_eq!(bare.params, None);
    }

    #[test]
    fn test_unknown_keeps_spelling() {
        let ctcp = Ctcp::parse("\x01ClientInfo\x01").unwrap();
        assert_eq!(ctcp.kind, CtcpKind::Unknown("ClientInfo".into()));
        assert_eq!(ctcp.kind.to_string(), "ClientInfo");
    }

    #[test]
    fn test_unterminated_body() {
        let ctcp = Ctcp::parse("\x01PING 99").unwrap();
        assert_eq!(ctcp.kind, CtcpKind::Ping);
        assert_eq!(ctcp.params, Some("99"));
    }

    #[test]
    fn test_rejects_bodies_without_command() {
        for body in ["plain text", "", "\x01", "\x01\x01", "\x01 \x01"] {
            assert!(Ctcp::parse(body).is_none(), "{body:?}");
        }
        assert!(Ctcp::is_ctcp("\x01\x01"));
        assert!(!Ctcp::is_ctcp("hi \x01PING\x01"));
    }

    #[test]
    fn test_encoding() {
        assert_eq!(Ctcp::action("dances").to_string(), "\x01ACTION dances\x01");
        assert_eq!(
            Ctcp::version_reply("slirc 0.1.0").to_string(),
            "\x01VERSION slirc 0.1.0\x01"
        );
        assert_eq!(Ctcp::ping_reply(None).to_string(), "\x01PING\x01");
    }
}
