//! Client-side helpers: a recording frontend and a poll driver.

use slirc_client::config::Config;
use slirc_client::history::NoopLog;
use slirc_client::ui::{Frontend, StatusBar};
use slirc_client::Client;
use std::time::{Duration, Instant};

/// Frontend that keeps every call as a line of text.
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<String>,
    pub debug: bool,
}

impl Recorder {
    pub fn statuses(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().filter_map(|c| c.strip_prefix("status: "))
    }

    pub fn has_status(&self, text: &str) -> bool {
        self.statuses().any(|s| s == text)
    }

    pub fn last_roster(&self) -> Option<&str> {
        self.calls
            .iter()
            .rev()
            .find_map(|c| c.strip_prefix("roster: "))
    }
}

impl Frontend for Recorder {
    fn status_message(&mut self, text: &str) {
        self.calls.push(format!("status: {text}"));
    }
    fn chat_message(&mut self, nick: &str, text: &str) {
        self.calls.push(format!("chat: <{nick}> {text}"));
    }
    fn private_message(&mut self, nick: &str, text: &str) {
        self.calls.push(format!("private: <{nick}> {text}"));
    }
    fn emote_message(&mut self, nick: &str, text: &str) {
        self.calls.push(format!("emote: {nick} {text}"));
    }
    fn roster_update(&mut self, nicks: &[String]) {
        self.calls.push(format!("roster: {}", nicks.join(" ")));
    }
    fn debug_message(&mut self, text: &str) {
        self.calls.push(format!("debug: {text}"));
    }
    fn status_bar(&mut self, bar: &StatusBar) {
        self.calls.push(format!("bar: {bar}"));
    }
    fn toggle_debug(&mut self) -> bool {
        self.debug = !self.debug;
        self.debug
    }
}

/// A client with nick `pyn`, user `pyu` and no log file.
pub fn test_client() -> Client<Recorder> {
    let mut config = Config::default();
    config.identity.nick = "pyn".into();
    config.identity.user = "pyu".into();
    config.identity.realname = "Pyn Apple".into();
    config.client.connect_timeout_secs = 2;
    Client::new(&config, Recorder::default(), Box::new(NoopLog))
}

/// Poll the client until `done` holds, failing after five seconds.
pub async fn pump_until<F>(client: &mut Client<Recorder>, mut done: F)
where
    F: FnMut(&Client<Recorder>) -> bool,
{
    let deadline = Instant::now() + Duration::from_secs(5);
    while !done(client) {
        assert!(Instant::now() < deadline, "condition not reached in time");
        client.poll(Duration::from_millis(20)).await;
    }
}
