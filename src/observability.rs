//! Process-wide counters for the acquisition pipeline

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics handle for recording pipeline counters
#[derive(Debug, Default)]
pub struct Metrics {
    urls_received: AtomicU64,
    media_published: AtomicU64,
    acquisitions_failed: AtomicU64,
    unsupported_links: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url_received(&self) {
        self.urls_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn media_published(&self) {
        self.media_published.fetch_add(1, Ordering::Relaxed);
    }

    pub fn acquisition_failed(&self) {
        self.acquisitions_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn unsupported_link(&self) {
        self.unsupported_links.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            urls_received: self.urls_received.load(Ordering::Relaxed),
            media_published: self.media_published.load(Ordering::Relaxed),
            acquisitions_failed: self.acquisitions_failed.load(Ordering::Relaxed),
            unsupported_links: self.unsupported_links.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub urls_received: u64,
    pub media_published: u64,
    pub acquisitions_failed: u64,
    pub unsupported_links: u64,
}
