use async_trait::async_trait;
use thiserror::Error;

use super::types::{ExtractedInfo, FetchRequest};

#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("failed to launch extractor: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("no downloadable stream satisfies the selection policy")]
    NoStream,

    #[error("extractor failed (exit {status}): {detail}")]
    Download { status: i32, detail: String },

    #[error("unparseable extractor metadata: {0}")]
    Metadata(#[from] serde_json::Error),
}

/// Site-agnostic media retrieval.
///
/// Kept behind a trait so handlers can be exercised without network access
/// or an extractor install; the production implementation is
/// [`super::YtDlpExtractor`].
#[async_trait]
pub trait MediaExtractor: Send + Sync {
    /// Download the media behind `url` per `request` and report its
    /// structural metadata.
    ///
    /// Returns only after the output file, including any stream merge, is
    /// fully written. The final path is recovered from the returned metadata
    /// via [`ExtractedInfo::output_path`].
    async fn fetch(
        &self,
        url: &str,
        request: &FetchRequest,
    ) -> Result<ExtractedInfo, ExtractorError>;
}
