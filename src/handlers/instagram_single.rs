use async_trait::async_trait;
use regex::RegexSet;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

use super::traits::{AcquisitionCause, AcquisitionError, Handler};
use crate::config::Config;
use crate::context::DelinkifyContext;
use crate::extractor::{FetchRequest, MediaExtractor};
use crate::media::Media;

pub const NAME: &str = "instagram_single";
pub const DEFAULT_WEIGHT: i32 = 500;

const URL_PATTERNS: &[&str] = &[
    r"^https://(www\.)?instagram\.com/(share/)?reel/([\w-]+)",
    r"^https://(www\.)?instagram\.com/p/([\w-]+)",
];

/// Handler for Instagram posts with a single video.
///
/// All reels are a single video, and so are the /p/ posts that land here
/// until a multi-item post handler exists to claim carousels at its own
/// weight. That ordering dependency is why the weight stays configurable.
pub struct InstagramSingle {
    patterns: RegexSet,
    weight: i32,
    request: FetchRequest,
    extractor: Arc<dyn MediaExtractor>,
}

impl std::fmt::Debug for InstagramSingle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstagramSingle")
            .field("weight", &self.weight)
            .finish_non_exhaustive()
    }
}

impl InstagramSingle {
    pub fn new(config: &Config, extractor: Arc<dyn MediaExtractor>) -> Self {
        let ceiling = config.extractor.max_filesize.as_u64();
        let request = FetchRequest {
            output_template: format!("{}/%(id)s.%(ext)s", config.tmp_dir.display()),
            // Preference order: merged AVC video + best audio under the
            // ceiling, then a single AVC stream, then whatever fits.
            format_policy: format!(
                "bestvideo[vcodec^=avc][filesize_approx<{ceiling}]+bestaudio/\
                 best[vcodec^=avc][filesize_approx<{ceiling}]/\
                 best[filesize_approx<{ceiling}]"
            ),
            allow_multiple_streams: true,
            merge_output_format: "mp4".to_string(),
            http_headers: BTreeMap::from([(
                "User-Agent".to_string(),
                config.extractor.user_agent.clone(),
            )]),
        };

        Self {
            patterns: RegexSet::new(URL_PATTERNS).expect("handler pattern table is valid"),
            weight: config.handler_weight(NAME).unwrap_or(DEFAULT_WEIGHT),
            request,
            extractor,
        }
    }
}

#[async_trait]
impl Handler for InstagramSingle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn url_patterns(&self) -> &RegexSet {
        &self.patterns
    }

    fn weight(&self) -> i32 {
        self.weight
    }

    async fn handle(&self, url: &str, ctx: &DelinkifyContext) -> Result<(), AcquisitionError> {
        let info = tokio::select! {
            result = self.extractor.fetch(url, &self.request) => {
                result.map_err(|cause| AcquisitionError::new(url, cause))?
            }
            _ = ctx.cancellation().cancelled() => {
                // Dropping the fetch future reaps the extractor subprocess;
                // whatever it already wrote is never reported.
                return Err(AcquisitionError::new(url, AcquisitionCause::Cancelled));
            }
        };

        let source = info.output_path(&self.request.output_template);
        let media = Media::new(source, info.title.clone(), url)
            .map_err(|cause| AcquisitionError::new(url, cause))?;

        let size = tokio::fs::metadata(media.source())
            .await
            .map(|m| m.len())
            .unwrap_or_default();
        info!(
            size,
            codec = info.video_codec(),
            format = %info.format_label(),
            "media acquired"
        );

        ctx.add_media(media)
            .await
            .map_err(|cause| AcquisitionError::new(url, cause))?;
        Ok(())
    }
}
