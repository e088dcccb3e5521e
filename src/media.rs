//! The normalized result of a successful acquisition.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("media file does not exist: {0}")]
    Missing(PathBuf),

    #[error("media file is empty: {0}")]
    Empty(PathBuf),

    #[error("failed to inspect media file {path}: {source}")]
    Inspect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One acquired artifact, ready for re-publishing.
///
/// Constructing a `Media` asserts that the backing file is fully written:
/// [`Media::new`] fails when the file is missing or empty, so a partial
/// download can never be handed downstream. Instances are immutable after
/// construction; ownership passes to the context on report, and the
/// downstream consumer owns eventual deletion of the backing file.
#[derive(Debug, Clone)]
pub struct Media {
    source: PathBuf,
    caption: Option<String>,
    original_url: String,
}

impl Media {
    pub fn new(
        source: PathBuf,
        caption: Option<String>,
        original_url: impl Into<String>,
    ) -> Result<Self, MediaError> {
        let metadata = fs::metadata(&source).map_err(|source_err| {
            if source_err.kind() == io::ErrorKind::NotFound {
                MediaError::Missing(source.clone())
            } else {
                MediaError::Inspect {
                    path: source.clone(),
                    source: source_err,
                }
            }
        })?;

        if metadata.len() == 0 {
            return Err(MediaError::Empty(source));
        }

        Ok(Self {
            source,
            caption,
            original_url: original_url.into(),
        })
    }

    /// Locally materialized file holding the media bytes.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Human-readable caption, when the source post carried one.
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    /// The URL this media was derived from, preserved verbatim.
    pub fn original_url(&self) -> &str {
        &self.original_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_new_requires_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.mp4");

        let result = Media::new(path, None, "https://example.com/post/1");
        assert!(matches!(result.unwrap_err(), MediaError::Missing(_)));
    }

    #[test]
    fn test_new_rejects_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.mp4");
        fs::write(&path, b"").unwrap();

        let result = Media::new(path, None, "https://example.com/post/1");
        assert!(matches!(result.unwrap_err(), MediaError::Empty(_)));
    }

    #[test]
    fn test_new_preserves_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("clip.mp4");
        fs::write(&path, b"not really mp4 bytes").unwrap();

        let media = Media::new(
            path.clone(),
            Some("a caption".to_string()),
            "https://example.com/post/1",
        )
        .unwrap();

        assert_eq!(media.source(), path);
        assert_eq!(media.caption(), Some("a caption"));
        assert_eq!(media.original_url(), "https://example.com/post/1");
    }

    #[test]
    fn test_absent_caption_is_valid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("clip.mp4");
        fs::write(&path, b"bytes").unwrap();

        let media = Media::new(path, None, "https://example.com/post/2").unwrap();
        assert_eq!(media.caption(), None);
    }
}
