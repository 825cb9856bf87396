//! Plain-text line log.

use super::{LineLog, LogError};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// Appends each line to a file, opened (and truncated) on the first line.
///
/// Nothing touches the disk until the first line arrives, so a session that
/// never connects leaves any previous log alone.
pub struct FileLog {
    path: PathBuf,
    file: Option<File>,
}

impl FileLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    async fn file(&mut self) -> Result<&mut File, LogError> {
        let file = match self.file.take() {
            Some(file) => file,
            None => {
                let file = File::create(&self.path).await?;
                info!(path = %self.path.display(), "logging raw traffic");
                file
            }
        };
        Ok(self.file.insert(file))
    }
}

#[async_trait]
impl LineLog for FileLog {
    async fn record(&mut self, line: &str) -> Result<(), LogError> {
        let file = self.file().await?;
        file.write_all(line.as_bytes()).await?;
        file.write_all(b"\n").await?;
        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_is_created_lazily_and_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        std::fs::write(&path, "old contents\n").unwrap();

        let mut log = FileLog::new(&path);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old contents\n");

        log.record("PING :a").await.unwrap();
        log.record(":srv 376 me :End").await.unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "PING :a\n:srv 376 me :End\n"
        );
    }

    #[tokio::test]
    async fn unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = FileLog::new(dir.path().join("missing-dir").join("log.txt"));
        assert!(log.record("PING :a").await.is_err());
    }

    #[tokio::test]
    async fn open_picks_noop_without_path() {
        let mut log = crate::history::open(None);
        log.record("anything").await.unwrap();
        let mut log = crate::history::open(Some(""));
        log.record("anything").await.unwrap();
    }
}
