//! Headless frontend: every capability becomes a tracing event.

use super::{Frontend, StatusBar};
use tracing::{debug, info};

/// Frontend for running without a terminal (bots, tests, piped output).
#[derive(Debug, Default)]
pub struct TracingFrontend {
    debug: bool,
}

impl TracingFrontend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontend for TracingFrontend {
    fn status_message(&mut self, text: &str) {
        info!(target: "slirc::ui", kind = "status", %text);
    }

    fn chat_message(&mut self, nick: &str, text: &str) {
        info!(target: "slirc::ui", kind = "chat", %nick, %text);
    }

    fn private_message(&mut self, nick: &str, text: &str) {
        info!(target: "slirc::ui", kind = "private", %nick, %text);
    }

    fn emote_message(&mut self, nick: &str, text: &str) {
        info!(target: "slirc::ui", kind = "emote", %nick, %text);
    }

    fn roster_update(&mut self, nicks: &[String]) {
        info!(target: "slirc::ui", kind = "roster", count = nicks.len(), nicks = ?nicks);
    }

    fn debug_message(&mut self, text: &str) {
        if self.debug {
            debug!(target: "slirc::ui", kind = "raw", %text);
        }
    }

    fn status_bar(&mut self, bar: &StatusBar) {
        info!(target: "slirc::ui", kind = "status_bar", bar = %bar);
    }

    fn toggle_debug(&mut self) -> bool {
        self.debug = !self.debug;
        self.debug
    }
}
