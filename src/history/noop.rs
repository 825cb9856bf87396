//! No-op line log that discards everything.
//!
//! Used when no log file is configured.

use super::{LineLog, LogError};
use async_trait::async_trait;

pub struct NoopLog;

#[async_trait]
impl LineLog for NoopLog {
    async fn record(&mut self, _line: &str) -> Result<(), LogError> {
        Ok(())
    }
}
