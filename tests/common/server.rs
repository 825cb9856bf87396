//! Scripted IRC server.

use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::TcpListener;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

/// A listener on `127.0.0.1` with an ephemeral port.
pub struct FakeServer {
    listener: TcpListener,
    port: u16,
}

impl FakeServer {
    pub async fn bind() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        Ok(Self { listener, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Accept the next client.
    pub async fn accept(&self) -> anyhow::Result<Peer> {
        let (stream, _) = timeout(Duration::from_secs(5), self.listener.accept()).await??;
        let (read, write) = stream.into_split();
        Ok(Peer {
            lines: BufReader::new(read).lines(),
            writer: write,
        })
    }
}

/// Server side of one client connection.
pub struct Peer {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl Peer {
    /// Send one line, CRLF appended.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\r\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Next line from the client, or an error after five seconds.
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        match timeout(Duration::from_secs(5), self.lines.next_line()).await?? {
            Some(line) => Ok(line),
            None => anyhow::bail!("client closed the connection"),
        }
    }

    /// Skip lines until one satisfies `predicate`.
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<String>
    where
        F: FnMut(&str) -> bool,
    {
        loop {
            let line = self.recv().await?;
            if predicate(&line) {
                return Ok(line);
            }
        }
    }

    /// Whether the client has closed its side.
    pub async fn is_closed(&mut self) -> bool {
        matches!(
            timeout(Duration::from_secs(5), self.lines.next_line()).await,
            Ok(Ok(None)) | Ok(Err(_))
        )
    }
}
