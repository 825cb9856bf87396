//! `FromStr` for [`Message`].
//!
//! The grammar is the small client-side subset: an optional `:origin`, a
//! command, space-separated middle parameters, and an optional trailing
//! parameter introduced by `" :"`.

use std::str::FromStr;

use crate::error::{MessageParseError, ProtocolError};

use super::types::Message;

/// Marker introducing the trailing parameter.
const TRAILING_MARKER: &str = " :";

fn split_params(s: &str) -> impl Iterator<Item = &str> {
    s.split(' ').filter(|p| !p.is_empty())
}

fn invalid(s: &str, cause: MessageParseError) -> ProtocolError {
    ProtocolError::InvalidMessage {
        string: s.to_owned(),
        cause,
    }
}

impl FromStr for Message {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Message, Self::Err> {
        let line = s.trim_end_matches(&['\r', '\n'][..]);
        if line.trim().is_empty() {
            return Err(invalid(s, MessageParseError::EmptyMessage));
        }

        let (origin, rest) = match line.strip_prefix(':') {
            Some(tail) => tail.split_once(' ').unwrap_or((tail, "")),
            None => ("", line),
        };

        let (leading, trailing) = match rest.split_once(TRAILING_MARKER) {
            Some((leading, trailing)) => (leading, Some(trailing)),
            None => (rest, None),
        };

        let mut tokens = split_params(leading);
        let command = tokens
            .next()
            .ok_or_else(|| invalid(s, MessageParseError::MissingCommand))?
            .to_owned();
        let mut params: Vec<String> = tokens.map(str::to_owned).collect();
        params.extend(trailing.map(str::to_owned));

        Ok(Message {
            origin: origin.to_owned(),
            command,
            params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_privmsg_with_origin() {
        let msg: Message = ":n!u@h PRIVMSG #c :hello there".parse().unwrap();
        assert_eq!(msg.origin, "n!u@h");
        assert_eq!(msg.command, "PRIVMSG");
        assert_eq!(msg.params, vec!["#c", "hello there"]);
    }

    #[test]
    fn test_parse_simple_ping() {
        let msg: Message = "PING :tok".parse().unwrap();
        assert_eq!(msg.origin, "");
        assert_eq!(msg.command, "PING");
        assert_eq!(msg.params, vec!["tok"]);
    }

    #[test]
    fn test_parse_without_trailing() {
        let msg: Message = ":alice!a@h JOIN #rust".parse().unwrap();
        assert_eq!(msg.command, "JOIN");
        assert_eq!(msg.params, vec!["#rust"]);
    }

    #[test]
    fn test_parse_numeric_names_reply() {
        let msg: Message = ":irc.example.com 353 me = #rust :@alice +bob carol"
            .parse()
            .unwrap();
        assert_eq!(msg.origin, "irc.example.com");
        assert_eq!(msg.command, "353");
        assert_eq!(msg.params, vec!["me", "=", "#rust", "@alice +bob carol"]);
    }

    #[test]
    fn test_trailing_keeps_inner_markers() {
        let msg: Message = "PRIVMSG #c :a :b  c".parse().unwrap();
        assert_eq!(msg.params, vec!["#c", "a :b  c"]);
    }

    #[test]
    fn test_repeated_spaces_are_collapsed() {
        let msg: Message = "MODE  #c   +o   alice".parse().unwrap();
        assert_eq!(msg.command, "MODE");
        assert_eq!(msg.params, vec!["#c", "+o", "alice"]);
    }

    #[test]
    fn test_empty_trailing_param() {
        let msg: Message = "TOPIC #c :".parse().unwrap();
        assert_eq!(msg.params, vec!["#c", ""]);
    }

    #[test]
    fn test_strips_line_terminator() {
        let msg: Message = "PING :tok\r\n".parse().unwrap();
        assert_eq!(msg.params, vec!["tok"]);
    }

    #[test]
    fn test_parse_empty_message() {
        let err = "".parse::<Message>().unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::InvalidMessage {
                cause: MessageParseError::EmptyMessage,
                ..
            }
        ));
        assert!("   ".parse::<Message>().is_err());
    }

    #[test]
    fn test_origin_without_command() {
        for line in [":origin", ":origin ", ":n!u@h  :only trailing"] {
            let err = line.parse::<Message>().unwrap_err();
            assert!(
                matches!(
                    err,
                    ProtocolError::InvalidMessage {
                        cause: MessageParseError::MissingCommand,
                        ..
                    }
                ),
                "{line:?} should lack a command"
            );
        }
    }
}
