//! Per-message orchestration: resolve each URL and run its handler.
//!
//! Each incoming URL becomes an independent tokio task; acquisition is the
//! suspension-heavy step and never blocks other in-flight URLs. Media items
//! arrive in completion order, not arrival order — no ordering is promised
//! across distinct URLs.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::context::DelinkifyContext;
use crate::extractor::{MediaExtractor, YtDlpExtractor};
use crate::handlers::{HandlerRegistry, InstagramSingle, RegistryError};
use crate::media::Media;
use crate::observability::Metrics;

/// Front-end entry point: the registry plus everything needed to run it.
pub struct Delinkifier {
    registry: Arc<HandlerRegistry>,
    config: Arc<Config>,
    metrics: Arc<Metrics>,
}

impl Delinkifier {
    /// Wire up the production extractor and every built-in handler.
    pub fn new(config: Config) -> Result<Self, RegistryError> {
        let extractor = Arc::new(YtDlpExtractor::new(&config.extractor.binary));
        Self::with_extractor(config, extractor)
    }

    /// Same wiring with a caller-supplied extractor (tests use stubs here).
    pub fn with_extractor(
        config: Config,
        extractor: Arc<dyn MediaExtractor>,
    ) -> Result<Self, RegistryError> {
        let mut registry = HandlerRegistry::new();
        registry.register(Arc::new(InstagramSingle::new(&config, extractor)))?;

        Ok(Self {
            registry: Arc::new(registry),
            config: Arc::new(config),
            metrics: Arc::new(Metrics::new()),
        })
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Delinkify a batch of URLs concurrently.
    ///
    /// Unmatched URLs are reported as unsupported and skipped; failed
    /// acquisitions are logged with their cause. Returns the media that made
    /// it through, in completion order.
    pub async fn run(&self, urls: Vec<String>, cancel: CancellationToken) -> Vec<Media> {
        let (media_tx, mut media_rx) = mpsc::channel(self.config.delivery.channel_capacity);
        let mut tasks = JoinSet::new();

        for url in urls {
            self.metrics.url_received();

            let handler = match self.registry.resolve(&url) {
                Ok(handler) => handler,
                Err(err) => {
                    self.metrics.unsupported_link();
                    warn!(url, %err, "unsupported link");
                    continue;
                }
            };

            info!(url, handler = handler.name(), "dispatching");
            let ctx = DelinkifyContext::new(&self.config.tmp_dir, media_tx.clone())
                .with_cancellation(cancel.child_token());
            let metrics = Arc::clone(&self.metrics);

            tasks.spawn(async move {
                if let Err(err) = handler.handle(&url, &ctx).await {
                    metrics.acquisition_failed();
                    error!(%err, "acquisition failed");
                }
            });
        }

        // Each task's context holds a sender clone; the channel drains to
        // None once the last in-flight handling is done.
        drop(media_tx);

        let mut collected = Vec::new();
        while let Some(media) = media_rx.recv().await {
            self.metrics.media_published();
            collected.push(media);
        }

        while let Some(result) = tasks.join_next().await {
            if let Err(err) = result {
                error!(%err, "handler task aborted");
            }
        }

        collected
    }
}
