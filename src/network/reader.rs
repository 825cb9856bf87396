//! Frame reader task.
//!
//! Runs on its own task, turning the read half of the socket into
//! [`RawLine`]s pushed in order onto the handoff queue. Partial lines are
//! kept in the codec buffer until their delimiter arrives.

use futures_util::StreamExt;
use slirc_proto::LineCodec;
use tokio::io::AsyncRead;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::codec::FramedRead;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, Span, debug, trace, warn};

/// Bytes requested from the socket per read.
pub const READ_CHUNK_SIZE: usize = 1024;

/// One complete protocol line, terminator and trailing whitespace removed.
pub type RawLine = String;

/// Spawn the reader for one connection.
///
/// The task stops as soon as `cancel` fires. End of stream or a read error
/// cancels the token from inside, which is how the processing loop learns
/// the server went away.
pub(super) fn spawn<R>(
    reader: R,
    lines: mpsc::UnboundedSender<RawLine>,
    cancel: CancellationToken,
    span: Span,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(read_lines(reader, lines, cancel).instrument(span))
}

async fn read_lines<R>(reader: R, lines: mpsc::UnboundedSender<RawLine>, cancel: CancellationToken)
where
    R: AsyncRead + Unpin,
{
    let mut framed = FramedRead::with_capacity(reader, LineCodec::new(), READ_CHUNK_SIZE);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("reader cancelled");
                break;
            }
            next = framed.next() => match next {
                Some(Ok(line)) => {
                    trace!(line = %line, "<-");
                    if lines.send(line).is_err() {
                        debug!("handoff queue closed");
                        cancel.cancel();
                        break;
                    }
                }
                Some(Err(e)) => {
                    warn!(error = %e, "read failed");
                    cancel.cancel();
                    break;
                }
                None => {
                    debug!("server closed the stream");
                    cancel.cancel();
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    async fn collect(mut rx: mpsc::UnboundedReceiver<RawLine>) -> Vec<RawLine> {
        let mut out = Vec::new();
        while let Some(line) = rx.recv().await {
            out.push(line);
        }
        out
    }

    #[tokio::test]
    async fn pushes_lines_in_order_and_cancels_on_eof() {
        let (mut server, client) = tokio::io::duplex(7);
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let handle = spawn(client, tx, cancel.clone(), Span::none());

        server
            .write_all(b"PRIVMSG #c :hi\r\nPING :x\nPART #c\n")
            .await
            .unwrap();
        drop(server);

        handle.await.unwrap();
        assert!(cancel.is_cancelled());
        assert_eq!(collect(rx).await, vec!["PRIVMSG #c :hi", "PING :x", "PART #c"]);
    }

    #[tokio::test]
    async fn stops_pushing_once_cancelled() {
        let (mut server, client) = tokio::io::duplex(64);
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let handle = spawn(client, tx, cancel.clone(), Span::none());

        cancel.cancel();
        handle.await.unwrap();
        // Nobody reads the pipe any more, so the write may fail.
        let _ = server.write_all(b"PING :late\n").await;

        assert!(collect(rx).await.is_empty());
    }
}
