//! Per-request collaborator handed to the selected handler.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::media::Media;

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("media consumer is gone")]
    Closed,
}

/// Request-scoped resources for one incoming URL.
///
/// The context owns delivery of produced [`Media`] back to the front-end and
/// exposes the working directory and cancellation token. One context per
/// incoming URL; contexts are never shared across in-flight handlings.
pub struct DelinkifyContext {
    media_tx: mpsc::Sender<Media>,
    tmp_dir: PathBuf,
    cancel: CancellationToken,
}

impl DelinkifyContext {
    pub fn new(tmp_dir: impl Into<PathBuf>, media_tx: mpsc::Sender<Media>) -> Self {
        Self {
            media_tx,
            tmp_dir: tmp_dir.into(),
            cancel: CancellationToken::new(),
        }
    }

    /// Tie this context to an externally owned cancellation token.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Hand a completed media item to the upstream consumer.
    ///
    /// Resolves once the consumer has accepted the item; the bounded channel
    /// provides backpressure when the front-end falls behind.
    pub async fn add_media(&self, media: Media) -> Result<(), ContextError> {
        self.media_tx
            .send(media)
            .await
            .map_err(|_| ContextError::Closed)
    }

    /// Working directory for temporary handler output.
    pub fn tmp_dir(&self) -> &Path {
        &self.tmp_dir
    }

    /// Cancellation signal for this request. Handlers race long-running
    /// acquisition against it and must not report after it fires.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample_media(dir: &TempDir) -> Media {
        let path = dir.path().join("clip.mp4");
        fs::write(&path, b"bytes").unwrap();
        Media::new(path, None, "https://example.com/post/1").unwrap()
    }

    #[tokio::test]
    async fn test_add_media_reaches_consumer() {
        let temp_dir = TempDir::new().unwrap();
        let (tx, mut rx) = mpsc::channel(1);
        let ctx = DelinkifyContext::new(temp_dir.path(), tx);

        ctx.add_media(sample_media(&temp_dir)).await.unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received.original_url(), "https://example.com/post/1");
    }

    #[tokio::test]
    async fn test_add_media_fails_when_consumer_dropped() {
        let temp_dir = TempDir::new().unwrap();
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let ctx = DelinkifyContext::new(temp_dir.path(), tx);

        let result = ctx.add_media(sample_media(&temp_dir)).await;
        assert!(matches!(result.unwrap_err(), ContextError::Closed));
    }
}
