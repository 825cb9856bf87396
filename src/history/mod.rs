//! Raw traffic log abstraction.
//!
//! Every inbound line is handed to a [`LineLog`] before it is parsed, so the
//! log shows exactly what the server sent, malformed lines included.

use async_trait::async_trait;
use thiserror::Error;

mod file;
mod noop;

pub use file::FileLog;
pub use noop::NoopLog;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait LineLog: Send {
    /// Record one raw inbound line.
    async fn record(&mut self, line: &str) -> Result<(), LogError>;
}

/// Pick the log for an optional configured path.
pub fn open(path: Option<&str>) -> Box<dyn LineLog> {
    match path {
        Some(path) if !path.is_empty() => Box::new(FileLog::new(path)),
        _ => Box::new(NoopLog),
    }
}
