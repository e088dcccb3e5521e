use async_trait::async_trait;
use regex::RegexSet;
use thiserror::Error;

use crate::context::{ContextError, DelinkifyContext};
use crate::extractor::ExtractorError;
use crate::media::MediaError;

/// Why an acquisition failed, separate from which URL it was for.
#[derive(Debug, Error)]
pub enum AcquisitionCause {
    #[error(transparent)]
    Extractor(#[from] ExtractorError),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error(transparent)]
    Delivery(#[from] ContextError),

    #[error("cancelled before completion")]
    Cancelled,
}

/// Acquisition failure with the originating URL attached.
#[derive(Debug, Error)]
#[error("failed to delinkify {url}: {cause}")]
pub struct AcquisitionError {
    pub url: String,
    pub cause: AcquisitionCause,
}

impl AcquisitionError {
    pub fn new(url: impl Into<String>, cause: impl Into<AcquisitionCause>) -> Self {
        Self {
            url: url.into(),
            cause: cause.into(),
        }
    }
}

/// A unit of "I know how to acquire media from this family of URLs".
///
/// Handlers declare the URL shapes they accept and a priority weight, and
/// implement the acquisition procedure. The registry owns matching and
/// selection; a handler may assume every URL passed to [`Handler::handle`]
/// already matched one of its own patterns.
#[async_trait]
pub trait Handler: Send + Sync + std::fmt::Debug {
    /// Stable identifier used for logs, duplicate detection and config
    /// weight overrides.
    fn name(&self) -> &'static str;

    /// URL shapes this handler accepts; matching any pattern is enough.
    /// Overlap with other handlers' patterns is expected and resolved by
    /// weight, never by pattern specificity.
    fn url_patterns(&self) -> &RegexSet;

    /// Priority among matching handlers; numerically higher wins.
    fn weight(&self) -> i32;

    /// Acquire the media behind `url` and report it through `ctx`.
    ///
    /// Writes temporary files under the context's working directory and
    /// reports each completed item via [`DelinkifyContext::add_media`] only
    /// after its backing file is fully written. Suspends on network and file
    /// I/O; callers must not assume it returns quickly. On failure nothing
    /// is reported, partial output included.
    async fn handle(&self, url: &str, ctx: &DelinkifyContext) -> Result<(), AcquisitionError>;
}
