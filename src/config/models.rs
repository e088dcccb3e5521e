use crate::humanize::ByteSize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Working directory for handler output. Assumed pre-created and
    /// writable; output filenames inside it are keyed on extractor-provided
    /// post ids, so concurrent acquisitions need no locking.
    #[serde(default = "default_tmp_dir")]
    pub tmp_dir: PathBuf,
    #[serde(default)]
    pub extractor: ExtractorConfig,
    /// Per-handler overrides, keyed by handler name.
    #[serde(default)]
    pub handlers: HashMap<String, HandlerSettings>,
    #[serde(default)]
    pub delivery: DeliveryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmp_dir: default_tmp_dir(),
            extractor: ExtractorConfig::default(),
            handlers: HashMap::new(),
            delivery: DeliveryConfig::default(),
        }
    }
}

impl Config {
    /// Weight override for a handler, when configured.
    pub fn handler_weight(&self, name: &str) -> Option<i32> {
        self.handlers.get(name).and_then(|settings| settings.weight)
    }

    /// Set a handler weight override programmatically (used by tests and
    /// front-end wiring).
    pub fn set_handler_weight(&mut self, name: impl Into<String>, weight: i32) {
        self.handlers
            .entry(name.into())
            .or_default()
            .weight = Some(weight);
    }
}

/// Extractor adapter configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractorConfig {
    /// Extractor binary to drive.
    #[serde(default = "default_binary")]
    pub binary: PathBuf,
    /// Ceiling applied to every stream alternative in the selection policy.
    #[serde(default = "default_max_filesize")]
    pub max_filesize: ByteSize,
    /// User-Agent header sent with extractor requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            max_filesize: default_max_filesize(),
            user_agent: default_user_agent(),
        }
    }
}

/// Per-handler settings (weights are provisional until the multi-item post
/// handler lands and the overlap ordering is settled)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HandlerSettings {
    pub weight: Option<i32>,
}

/// Media hand-off configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeliveryConfig {
    /// Capacity of the bounded Media channel between handlers and the
    /// front-end consumer.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_tmp_dir() -> PathBuf {
    std::env::temp_dir().join("delinkify")
}

fn default_binary() -> PathBuf {
    PathBuf::from("yt-dlp")
}

fn default_max_filesize() -> ByteSize {
    ByteSize(35 * 1024 * 1024) // 35 MB
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:136.0) Gecko/20100101 Firefox/136.0".to_string()
}

fn default_channel_capacity() -> usize {
    16
}
