//! Line-oriented terminal frontend.

use super::{Frontend, StatusBar};
use crate::filter::{Censor, Highlighter};
use chrono::Local;
use std::borrow::Cow;
use std::io::Write;
use tracing::warn;

const HIGHLIGHT_ON: &str = "\x1b[1;7m";
const HIGHLIGHT_OFF: &str = "\x1b[0m";

/// Foreground colours handed out to nicks. Black and white are left out so
/// every nick stays readable on both light and dark terminals.
const NICK_PALETTE: [u8; 12] = [31, 32, 33, 34, 35, 36, 91, 92, 93, 94, 95, 96];
const DEFAULT_FOREGROUND: &str = "\x1b[39m";

/// The palette entry for `nick`. Case variants of one nick share a colour.
fn nick_color(nick: &str) -> u8 {
    let hash = slirc_proto::irc_to_lower(nick)
        .bytes()
        .fold(5381u32, |hash, b| hash.wrapping_mul(33) ^ u32::from(b));
    NICK_PALETTE[hash as usize % NICK_PALETTE.len()]
}

/// Writes timestamped lines to any [`Write`] sink (stdout in the binary).
///
/// Displayed text passes through the [`Censor`]. Messages from other people
/// that mention our nick or a highlight word are shown in reverse video.
pub struct TerminalFrontend<W: Write> {
    out: W,
    censor: Censor,
    highlighter: Highlighter,
    nick: String,
    debug: bool,
    nick_colors: bool,
}

impl<W: Write> TerminalFrontend<W> {
    pub fn new(out: W, censor: Censor, highlighter: Highlighter) -> Self {
        Self {
            out,
            censor,
            highlighter,
            nick: String::new(),
            debug: false,
            nick_colors: false,
        }
    }

    /// Colour each sender nick by a stable hash of its name.
    pub fn with_nick_colors(mut self, on: bool) -> Self {
        self.nick_colors = on;
        self
    }

    /// The sink, for inspection.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn emit(&mut self, text: &str, highlight: bool) {
        let stamp = Local::now().format("[%H:%M]");
        let text = self.censor.censor(text);
        let result = if highlight {
            writeln!(self.out, "{stamp} {HIGHLIGHT_ON}{text}{HIGHLIGHT_OFF}")
        } else {
            writeln!(self.out, "{stamp} {text}")
        };
        if let Err(e) = result.and_then(|()| self.out.flush()) {
            warn!(error = %e, "terminal write failed");
        }
    }

    fn paint<'a>(&self, nick: &'a str) -> Cow<'a, str> {
        if self.nick_colors {
            Cow::Owned(format!(
                "\x1b[{}m{nick}{DEFAULT_FOREGROUND}",
                nick_color(nick)
            ))
        } else {
            Cow::Borrowed(nick)
        }
    }

    fn from_someone_else(&self, nick: &str) -> bool {
        !self.nick.is_empty() && !slirc_proto::irc_eq(nick, &self.nick)
    }

    fn is_highlight(&self, nick: &str, text: &str) -> bool {
        self.from_someone_else(nick) && self.highlighter.mentions(text, &self.nick)
    }
}

impl<W: Write> Frontend for TerminalFrontend<W> {
    fn status_message(&mut self, text: &str) {
        self.emit(&format!("== {text}"), false);
    }

    fn chat_message(&mut self, nick: &str, text: &str) {
        let highlight = self.is_highlight(nick, text);
        let shown = self.paint(nick);
        self.emit(&format!("<{shown}> {text}"), highlight);
    }

    fn private_message(&mut self, nick: &str, text: &str) {
        let highlight = self.is_highlight(nick, text);
        let shown = self.paint(nick);
        self.emit(&format!("<{shown}> [private] {text}"), highlight);
    }

    fn emote_message(&mut self, nick: &str, text: &str) {
        let highlight = self.is_highlight(nick, text);
        let shown = self.paint(nick);
        self.emit(&format!("* {shown} {text}"), highlight);
    }

    fn roster_update(&mut self, nicks: &[String]) {
        self.emit(&format!("== users ({}): {}", nicks.len(), nicks.join(" ")), false);
    }

    fn debug_message(&mut self, text: &str) {
        if self.debug {
            self.emit(text, false);
        }
    }

    fn status_bar(&mut self, bar: &StatusBar) {
        self.nick.clone_from(&bar.nick);
        self.emit(&format!("-- {bar}"), false);
    }

    fn toggle_debug(&mut self) -> bool {
        self.debug = !self.debug;
        self.debug
    }
}
