//! The processing loop.
//!
//! [`Client`] owns the [`Session`], the current [`Connection`], the frontend
//! and the line log. All state changes happen here, on one task: local
//! requests arrive through the `connect`/`join`/`say`/... methods, server
//! lines through [`Client::poll`].

use crate::config::{AutoconnectConfig, ClientConfig, Config};
use crate::error::{ClientError, SessionError};
use crate::event::Event;
use crate::handlers::{self, ClientInfo, Reaction};
use crate::history::LineLog;
use crate::input::{HELP, Input, InputParser};
use crate::network::{Connection, Poll, RawLine};
use crate::state::{ConnectionState, Endpoint, Identity, Session};
use crate::telemetry::spans;
use crate::ui::{self, Frontend};
use slirc_proto::{Command, Message};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{debug, info, warn};

/// Whether the loop should keep going after a line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Client<F: Frontend> {
    session: Session,
    connection: Option<Connection>,
    frontend: F,
    log: Box<dyn LineLog>,
    input: InputParser,
    info: ClientInfo,
    settings: ClientConfig,
    /// Room to join once the server reports it is ready.
    autojoin: Option<String>,
}

impl<F: Frontend> Client<F> {
    pub fn new(config: &Config, frontend: F, log: Box<dyn LineLog>) -> Self {
        Self {
            session: Session::new(Identity::from(&config.identity)),
            connection: None,
            frontend,
            log,
            input: InputParser::new(),
            info: ClientInfo::current(),
            settings: config.client.clone(),
            autojoin: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    /// Print the startup banner.
    pub fn greet(&mut self) {
        self.status(format!(
            "welcome to {} v{}",
            self.info.name, self.info.version
        ));
        self.status("type /help for a list of commands");
        self.frontend
            .status_bar(&ui::StatusBar::from(&self.session));
    }

    fn notify(&mut self, event: Event) {
        ui::render(&mut self.frontend, &event, &self.session);
    }

    fn status(&mut self, text: impl Into<String>) {
        self.notify(Event::status(text));
    }

    // ------------------------------------------------------------------
    // Connection lifecycle
    // ------------------------------------------------------------------

    /// Open a connection and log in.
    ///
    /// Fails without touching the session unless it is disconnected. On a
    /// network failure the session goes back to disconnected.
    pub async fn connect(&mut self, host: &str, port: u16) -> Result<(), ClientError> {
        let endpoint = Endpoint::new(host, port);
        self.session.begin_connect(endpoint.clone())?;
        self.status(format!("connecting to {endpoint}"));
        self.notify(Event::Connection(ConnectionState::Connecting));

        let connection =
            match Connection::open(&endpoint, self.settings.connect_timeout()).await {
                Ok(connection) => connection,
                Err(e) => {
                    warn!(endpoint = %endpoint, error = %e, "connect failed");
                    self.session.reset();
                    self.notify(Event::Connection(ConnectionState::Disconnected));
                    return Err(e.into());
                }
            };
        self.connection = Some(connection);

        let identity = self.session.identity().clone();
        let login = match Command::login(
            &identity.nick,
            &identity.user,
            &identity.hostname,
            &endpoint.host,
            &identity.realname,
        ) {
            Ok(login) => login,
            Err(e) => {
                self.teardown("disconnected").await;
                return Err(e.into());
            }
        };
        for cmd in login {
            self.send(cmd).await?;
        }

        self.status(format!("using nickname {}", identity.nick));
        self.session.mark_connected();
        info!(endpoint = %endpoint, nick = %identity.nick, "logged in");
        self.notify(Event::Connection(ConnectionState::Connected));
        Ok(())
    }

    /// Say goodbye and close the connection. Without a `reason` the
    /// configured quit message is sent.
    pub async fn disconnect(&mut self, reason: Option<&str>) -> Result<(), ClientError> {
        if self.session.state() == ConnectionState::Disconnected {
            return Err(SessionError::NotConnected.into());
        }
        let reason = reason.unwrap_or(&self.settings.quit_message).to_string();
        match Command::quit(&reason) {
            // A failed QUIT already tears the connection down.
            Ok(quit) => {
                let _ = self.send(quit).await;
            }
            Err(e) => warn!(error = %e, "invalid quit message, closing without it"),
        }
        self.teardown("disconnected").await;
        Ok(())
    }

    /// Stop the reader, close the socket and clear the session.
    async fn teardown(&mut self, reason: &str) {
        let connection = self.connection.take();
        if connection.is_none() && self.session.state() == ConnectionState::Disconnected {
            return;
        }
        if let Some(connection) = connection {
            if let Err(e) = connection.close().await {
                debug!(error = %e, "error closing connection");
            }
        }
        self.session.reset();
        self.autojoin = None;
        self.status(reason);
        self.notify(Event::Connection(ConnectionState::Disconnected));
        self.notify(Event::Roster(Vec::new()));
    }

    /// Write one command. A write failure tears the connection down.
    async fn send(&mut self, cmd: Command) -> Result<(), ClientError> {
        let Some(connection) = self.connection.as_mut() else {
            return Err(SessionError::NotConnected.into());
        };
        let line = cmd.to_string();
        match connection.send(cmd).await {
            Ok(()) => {
                self.notify(Event::Debug(format!("-> {line}")));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "write failed");
                self.teardown("connection closed").await;
                Err(ClientError::Write(e))
            }
        }
    }

    // ------------------------------------------------------------------
    // Local requests
    // ------------------------------------------------------------------

    /// Ask to join a room. The session changes when the server echoes our JOIN.
    pub async fn join(&mut self, room: &str) -> Result<(), ClientError> {
        if !self.session.is_connected() {
            return Err(SessionError::NotConnected.into());
        }
        if let Some(current) = self.session.room() {
            return Err(SessionError::AlreadyJoined(current.to_string()).into());
        }
        self.send(Command::join(room)?).await
    }

    /// Leave the current room.
    pub async fn part(&mut self) -> Result<(), ClientError> {
        let room = self
            .session
            .room()
            .ok_or(SessionError::NotJoined)?
            .to_string();
        self.send(Command::part(&room)?).await?;
        self.session.leave_room()?;
        self.status(format!("left channel {room}"));
        self.notify(Event::Connection(ConnectionState::Connected));
        self.notify(Event::Roster(Vec::new()));
        Ok(())
    }

    /// Say something in the current room.
    pub async fn say(&mut self, text: &str) -> Result<(), ClientError> {
        let room = self
            .session
            .room()
            .ok_or(SessionError::NotJoined)?
            .to_string();
        self.send(Command::privmsg(&room, text)?).await?;
        self.notify(Event::RoomMessage {
            nick: self.session.nick().to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    /// Send a private message.
    pub async fn msg(&mut self, nick: &str, text: &str) -> Result<(), ClientError> {
        if !self.session.is_connected() {
            return Err(SessionError::NotConnected.into());
        }
        self.send(Command::privmsg(nick, text)?).await?;
        self.notify(Event::PrivateSent {
            target: nick.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    /// Change nick. Offline this takes effect at once; online the server
    /// has to acknowledge it first.
    pub async fn rename(&mut self, nick: &str) -> Result<(), ClientError> {
        let cmd = Command::nick(nick)?;
        if self.session.state() == ConnectionState::Disconnected {
            let old = self.session.nick().to_string();
            self.session.set_nick(nick);
            self.notify(Event::Renamed {
                old,
                new: nick.to_string(),
                own: true,
            });
            return Ok(());
        }
        self.send(cmd).await
    }

    /// Ask the server for the room's member list.
    pub async fn names(&mut self) -> Result<(), ClientError> {
        let room = self
            .session
            .room()
            .ok_or(SessionError::NotJoined)?
            .to_string();
        self.send(Command::names(&room)?).await
    }

    /// Connect as configured and join the configured room once ready.
    /// Failures are shown like those of `/connect`.
    pub async fn autoconnect(&mut self, auto: &AutoconnectConfig) -> Result<(), ClientError> {
        if let Err(e) = self.connect(&auto.host, auto.port).await {
            self.status(e.to_string());
            return Err(e);
        }
        self.autojoin = auto.channel.clone();
        Ok(())
    }

    /// Handle one line of user input. Failures are shown as status lines.
    pub async fn handle_input(&mut self, line: &str) -> Flow {
        let input = match self.input.parse(line) {
            Ok(Some(input)) => input,
            Ok(None) => return Flow::Continue,
            Err(e) => {
                self.status(e.to_string());
                return Flow::Continue;
            }
        };

        let result = match input {
            Input::Connect { host, port } => self.connect(&host, port).await,
            Input::Disconnect(reason) => {
                if self.session.is_joined() {
                    let _ = self.part().await;
                }
                self.disconnect(reason.as_deref()).await
            }
            Input::Join(room) => self.join(&room).await,
            Input::Part => self.part().await,
            Input::Msg { nick, text } => self.msg(&nick, &text).await,
            Input::Nick(nick) => self.rename(&nick).await,
            Input::Names => self.names().await,
            Input::Say(text) => self.say(&text).await,
            Input::Debug => {
                let on = self.frontend.toggle_debug();
                self.status(format!("debug output {}", if on { "on" } else { "off" }));
                Ok(())
            }
            Input::Help => {
                for line in HELP {
                    self.status(*line);
                }
                Ok(())
            }
            Input::Quit(reason) => {
                self.shutdown(reason.as_deref()).await;
                return Flow::Quit;
            }
        };

        if let Err(e) = result {
            self.status(e.to_string());
        }
        Flow::Continue
    }

    /// Leave the room and the server, if we are on one.
    pub async fn shutdown(&mut self, reason: Option<&str>) {
        if self.session.is_joined() {
            let _ = self.part().await;
        }
        if self.session.state() != ConnectionState::Disconnected {
            let _ = self.disconnect(reason).await;
        }
    }

    // ------------------------------------------------------------------
    // Inbound traffic
    // ------------------------------------------------------------------

    /// Wait up to `wait` for one server line and process it.
    ///
    /// Without a connection this just sleeps for `wait` and reports
    /// [`Poll::Closed`].
    pub async fn poll(&mut self, wait: Duration) -> Poll {
        let Some(connection) = self.connection.as_mut() else {
            tokio::time::sleep(wait).await;
            return Poll::Closed;
        };
        match connection.poll(wait).await {
            Poll::Line(line) => {
                self.process_line(&line).await;
                Poll::Line(line)
            }
            Poll::Idle => Poll::Idle,
            Poll::Closed => {
                info!("server closed the connection");
                self.teardown("connection closed").await;
                Poll::Closed
            }
        }
    }

    /// Log, parse and dispatch one raw line.
    pub async fn process_line(&mut self, line: &RawLine) {
        self.notify(Event::Debug(format!("<- {line}")));
        if let Err(e) = self.log.record(line).await {
            warn!(error = %e, "failed to log line");
        }

        let msg: Message = match line.parse() {
            Ok(msg) => msg,
            Err(e) => {
                warn!(error = %e, "dropping malformed line");
                self.notify(Event::Debug(format!("!! {e}")));
                return;
            }
        };

        let span = spans::inbound(&msg.command, &msg.origin);
        let reactions = match span.in_scope(|| {
            handlers::dispatch(&mut self.session, &msg, &self.info)
        }) {
            Ok(reactions) => reactions,
            Err(e) => {
                warn!(parent: &span, error = %e, code = e.error_code(), "dropping message");
                self.notify(Event::Debug(format!("!! {e}")));
                return;
            }
        };

        for reaction in reactions {
            match reaction {
                Reaction::Reply(cmd) => {
                    if self.send(cmd).await.is_err() {
                        return;
                    }
                }
                Reaction::Notify(event) => {
                    let ready = event == Event::Ready;
                    self.notify(event);
                    if ready {
                        self.join_pending().await;
                    }
                }
            }
        }
    }

    async fn join_pending(&mut self) {
        if let Some(room) = self.autojoin.take() {
            if let Err(e) = self.join(&room).await {
                self.status(e.to_string());
            }
        }
    }

    /// Run until `/quit` or until the input channel closes.
    ///
    /// Each turn drains all pending input, then waits briefly for the
    /// network.
    pub async fn run(&mut self, mut input: mpsc::UnboundedReceiver<String>) {
        let interval = self.settings.poll_interval();
        loop {
            loop {
                match input.try_recv() {
                    Ok(line) => {
                        if self.handle_input(&line).await == Flow::Quit {
                            return;
                        }
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        debug!("input closed");
                        self.shutdown(None).await;
                        return;
                    }
                }
            }
            self.poll(interval).await;
        }
    }
}
