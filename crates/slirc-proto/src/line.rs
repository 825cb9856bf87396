//! Tokio codec between a byte stream and IRC lines.
//!
//! Splits an inbound byte stream on `\n` and encodes outbound [`Command`]s as
//! `\r\n`-terminated lines. Bytes are buffered across reads, so a line split
//! over any number of chunks is reassembled exactly once.

use std::borrow::Cow;

use bytes::{BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, warn};

use crate::command::Command;
use crate::error;

/// Longest accepted inbound line in bytes, tags and delimiter included.
pub const MAX_LINE_LEN: usize = 8191;

/// Line-based codec that handles newline-terminated messages.
#[derive(Debug)]
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum line length
    max_len: usize,
    /// Skipping the remainder of an over-long line
    discarding: bool,
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl LineCodec {
    /// Create a codec with the default line limit.
    pub fn new() -> Self {
        Self::with_max_len(MAX_LINE_LEN)
    }

    /// Create a codec with a custom line limit.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
            discarding: false,
        }
    }

    fn finish_line(raw: &[u8]) -> Option<String> {
        let text = String::from_utf8_lossy(raw);
        if let Cow::Owned(_) = text {
            debug!("replaced invalid UTF-8 in inbound line");
        }
        let trimmed = text.trim_end();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_owned())
        }
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        loop {
            let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') else {
                if src.len() > self.max_len {
                    warn!(
                        len = src.len(),
                        limit = self.max_len,
                        "inbound line too long, discarding"
                    );
                    src.clear();
                    self.discarding = true;
                }
                self.next_index = src.len();
                return Ok(None);
            };

            let line = src.split_to(self.next_index + offset + 1);
            self.next_index = 0;

            if self.discarding {
                self.discarding = false;
                continue;
            }

            if line.len() > self.max_len {
                warn!(
                    len = line.len(),
                    limit = self.max_len,
                    "inbound line too long, discarding"
                );
                continue;
            }

            if let Some(text) = Self::finish_line(&line[..line.len() - 1]) {
                return Ok(Some(text));
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }
        if !src.is_empty() {
            debug!(bytes = src.len(), "dropping partial line at end of stream");
            src.clear();
        }
        self.next_index = 0;
        self.discarding = false;
        Ok(None)
    }
}

impl Encoder<Command> for LineCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, cmd: Command, dst: &mut BytesMut) -> error::Result<()> {
        let line = cmd.to_string();
        if let Some(ch) = line.chars().find(|&c| c == '\r' || c == '\n' || c == '\0') {
            return Err(error::ProtocolError::IllegalControlChar(ch));
        }
        dst.reserve(line.len() + 2);
        dst.put_slice(line.as_bytes());
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(codec: &mut LineCodec, buf: &mut BytesMut) -> Vec<String> {
        let mut out = Vec::new();
        while let Some(line) = codec.decode(buf).unwrap() {
            out.push(line);
        }
        out
    }

    #[test]
    fn test_decode_complete_line() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PING :test\r\n");

        let result = codec.decode(&mut buf).unwrap();
        assert_eq!(result, Some("PING :test".to_string()));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_partial_line() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PING :");

        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        buf.extend_from_slice(b"x\n");
        assert_eq!(codec.decode(&mut buf).unwrap(), Some("PING :x".to_string()));
    }

    #[test]
    fn test_reassembly_independent_of_chunk_size() {
        let stream = b"PRIVMSG #c :hi\nPING :x\nPART #c\n";
        for chunk_size in 1..=stream.len() {
            let mut codec = LineCodec::new();
            let mut buf = BytesMut::new();
            let mut lines = Vec::new();
            for chunk in stream.chunks(chunk_size) {
                buf.extend_from_slice(chunk);
                lines.extend(drain(&mut codec, &mut buf));
            }
            assert_eq!(
                lines,
                vec!["PRIVMSG #c :hi", "PING :x", "PART #c"],
                "chunk size {chunk_size}"
            );
        }
    }

    #[test]
    fn test_skips_blank_lines_and_trailing_whitespace() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("\r\n   \nPING :x  \t\r\n");
        assert_eq!(drain(&mut codec, &mut buf), vec!["PING :x"]);
    }

    #[test]
    fn test_too_long_line_is_skipped() {
        let mut codec = LineCodec::with_max_len(10);
        let mut buf = BytesMut::from("this is way too long\nPING :x\n");
        assert_eq!(drain(&mut codec, &mut buf), vec!["PING :x"]);
    }

    #[test]
    fn test_too_long_partial_is_discarded_through_delimiter() {
        let mut codec = LineCodec::with_max_len(10);
        let mut buf = BytesMut::from("0123456789abcdef");
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        assert!(buf.is_empty());

        buf.extend_from_slice(b"tail of it\nPING :y\n");
        assert_eq!(drain(&mut codec, &mut buf), vec!["PING :y"]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from(&b"PRIVMSG #c :caf\xe9\n"[..]);
        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some("PRIVMSG #c :caf\u{fffd}".to_string())
        );
    }

    #[test]
    fn test_decode_eof_drops_partial() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PING :x\nPAR");
        assert_eq!(codec.decode_eof(&mut buf).unwrap(), Some("PING :x".into()));
        assert_eq!(codec.decode_eof(&mut buf).unwrap(), None);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_encode() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::new();

        codec.encode(Command::pong("test").unwrap(), &mut buf).unwrap();
        assert_eq!(&buf[..], b"PONG test\r\n");
    }

    #[test]
    fn test_encode_rejects_unchecked_line_break() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::new();

        let result = codec.encode(Command::NICK("a\r\nQUIT".to_string()), &mut buf);
        assert!(matches!(
            result,
            Err(error::ProtocolError::IllegalControlChar('\r'))
        ));
        assert!(buf.is_empty());
    }
}
