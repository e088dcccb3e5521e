use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Marker reported in diagnostics when the extractor left a field blank.
pub const UNKNOWN: &str = "unknown";

/// Options bundle handed to a [`super::MediaExtractor`] for one fetch.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Output path template. `%(id)s` and `%(ext)s` are substituted from the
    /// reported metadata, which keys every download on the extractor-provided
    /// post id: distinct posts never collide, repeated fetches of the same
    /// post overwrite deterministically.
    pub output_template: String,
    /// Ordered stream preference string; the first satisfiable alternative
    /// wins.
    pub format_policy: String,
    pub allow_multiple_streams: bool,
    /// Container every download is remuxed into, regardless of source.
    pub merge_output_format: String,
    pub http_headers: BTreeMap<String, String>,
}

/// One component stream of a merged download.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamInfo {
    pub format_id: String,
    #[serde(default)]
    pub vcodec: Option<String>,
}

/// Structural metadata reported by the extractor after a completed download.
///
/// Mirrors the extractor's info dictionary: a merged download carries a
/// `requested_formats` sequence with one entry per component stream, a
/// single-stream download carries flat `vcodec`/`format_id` fields instead.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractedInfo {
    pub id: String,
    pub ext: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub vcodec: Option<String>,
    #[serde(default)]
    pub format_id: Option<String>,
    #[serde(default)]
    pub requested_formats: Option<Vec<StreamInfo>>,
}

impl ExtractedInfo {
    /// Final on-disk location of this item under `template`.
    pub fn output_path(&self, template: &str) -> PathBuf {
        PathBuf::from(
            template
                .replace("%(id)s", &self.id)
                .replace("%(ext)s", &self.ext),
        )
    }

    /// Video codec for diagnostics: the first component stream that reports
    /// one, else the flat field, else [`UNKNOWN`]. Logging only, no
    /// correctness weight.
    pub fn video_codec(&self) -> &str {
        match &self.requested_formats {
            Some(formats) => formats
                .iter()
                .find_map(|f| f.vcodec.as_deref())
                .unwrap_or(UNKNOWN),
            None => self.vcodec.as_deref().unwrap_or(UNKNOWN),
        }
    }

    /// Format identifier for diagnostics: component ids joined with `+`, or
    /// the flat id.
    pub fn format_label(&self) -> String {
        match &self.requested_formats {
            Some(formats) => formats
                .iter()
                .map(|f| f.format_id.as_str())
                .collect::<Vec<_>>()
                .join("+"),
            None => self.format_id.clone().unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }
}
