//! Connection - one TCP link to an IRC server.
//!
//! ```text
//!   TcpStream ──into_split──┬── OwnedReadHalf ──▶ reader task ──▶ mpsc ──▶ poll()
//!                           └── OwnedWriteHalf ◀── FramedWrite ◀── send()
//! ```
//!
//! The reader owns the read half for the whole connection. The processing
//! loop owns the `Connection` and with it the write half and the receiving
//! end of the handoff queue.

use super::reader::{self, RawLine};
use crate::error::ConnectError;
use crate::state::Endpoint;
use crate::telemetry::spans;
use futures_util::SinkExt;
use slirc_proto::{Command, LineCodec, ProtocolError};
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::codec::FramedWrite;
use tokio_util::sync::CancellationToken;
use tracing::{Span, debug, info, warn};

/// Result of waiting for one inbound line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Poll {
    /// A complete line arrived.
    Line(RawLine),
    /// Nothing arrived within the wait.
    Idle,
    /// The reader has stopped and every queued line has been handed out.
    Closed,
}

/// An open connection with a running frame reader.
pub struct Connection {
    endpoint: Endpoint,
    writer: FramedWrite<OwnedWriteHalf, LineCodec>,
    lines: mpsc::UnboundedReceiver<RawLine>,
    cancel: CancellationToken,
    reader: Option<JoinHandle<()>>,
    span: Span,
}

impl Connection {
    /// Resolve, connect and start the reader, all bounded by `connect_timeout`.
    pub async fn open(
        endpoint: &Endpoint,
        connect_timeout: Duration,
    ) -> Result<Self, ConnectError> {
        let span = spans::connection(&endpoint.host, endpoint.port);
        let stream = tokio::time::timeout(connect_timeout, connect_stream(endpoint))
            .await
            .map_err(|_| ConnectError::Timeout(endpoint.to_string()))??;
        stream.set_nodelay(true).map_err(|source| ConnectError::Io {
            addr: endpoint.to_string(),
            source,
        })?;

        let (read_half, write_half) = stream.into_split();
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let handle = reader::spawn(read_half, tx, cancel.clone(), span.clone());

        span.in_scope(|| info!("connected"));
        Ok(Self {
            endpoint: endpoint.clone(),
            writer: FramedWrite::new(write_half, LineCodec::new()),
            lines: rx,
            cancel,
            reader: Some(handle),
            span,
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Whether the reader has stopped (remote close, read error or [`close`]).
    ///
    /// [`close`]: Connection::close
    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Write one command and flush it.
    pub async fn send(&mut self, cmd: Command) -> Result<(), ProtocolError> {
        debug!(parent: &self.span, command = cmd.name(), "->");
        self.writer.send(cmd).await
    }

    /// Wait up to `wait` for the next inbound line.
    ///
    /// Lines already queued are returned before [`Poll::Closed`], so nothing
    /// the server sent before hanging up is lost.
    pub async fn poll(&mut self, wait: Duration) -> Poll {
        match tokio::time::timeout(wait, self.lines.recv()).await {
            Ok(Some(line)) => Poll::Line(line),
            Ok(None) => Poll::Closed,
            Err(_) => Poll::Idle,
        }
    }

    /// Stop the reader, wait for it to finish and shut down the write half.
    pub async fn close(mut self) -> io::Result<()> {
        self.cancel.cancel();
        if let Some(handle) = self.reader.take() {
            if let Err(e) = handle.await {
                warn!(parent: &self.span, error = %e, "reader task failed");
            }
        }
        let result = self.writer.close().await.map_err(|e| match e {
            ProtocolError::Io(e) => e,
            other => io::Error::other(other),
        });
        self.span.in_scope(|| info!("closed"));
        result
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Try every resolved address in turn; report the last failure.
async fn connect_stream(endpoint: &Endpoint) -> Result<TcpStream, ConnectError> {
    let addrs: Vec<SocketAddr> = tokio::net::lookup_host((endpoint.host.as_str(), endpoint.port))
        .await
        .map_err(|source| ConnectError::Resolve {
            host: endpoint.host.clone(),
            source,
        })?
        .collect();

    let mut last_err = None;
    for addr in addrs {
        match TcpStream::connect(addr).await {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                debug!(%addr, error = %e, "connect attempt failed");
                last_err = Some(e);
            }
        }
    }

    match last_err {
        None => Err(ConnectError::NoAddress(endpoint.host.clone())),
        Some(e) if e.kind() == io::ErrorKind::ConnectionRefused => {
            Err(ConnectError::Refused(endpoint.to_string()))
        }
        Some(source) => Err(ConnectError::Io {
            addr: endpoint.to_string(),
            source,
        }),
    }
}
