use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use super::traits::{ExtractorError, MediaExtractor};
use super::types::{ExtractedInfo, FetchRequest};

/// Production extractor driving the `yt-dlp` binary.
///
/// One subprocess per fetch. yt-dlp downloads (and merges) the selected
/// streams, then dumps the info dictionary as a single JSON object on
/// stdout, which becomes the [`ExtractedInfo`]. `kill_on_drop` reaps the
/// subprocess when the owning task is cancelled mid-download.
pub struct YtDlpExtractor {
    binary: PathBuf,
}

impl YtDlpExtractor {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn command(&self, url: &str, request: &FetchRequest) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(["--dump-single-json", "--no-simulate"])
            .args(["--no-playlist", "--quiet", "--no-progress"])
            .args(["--format", &request.format_policy])
            .args(["--output", &request.output_template])
            .args(["--merge-output-format", &request.merge_output_format]);

        if request.allow_multiple_streams {
            cmd.arg("--audio-multistreams");
        }

        for (name, value) in &request.http_headers {
            cmd.args(["--add-headers", &format!("{name}:{value}")]);
        }

        cmd.arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl MediaExtractor for YtDlpExtractor {
    async fn fetch(
        &self,
        url: &str,
        request: &FetchRequest,
    ) -> Result<ExtractedInfo, ExtractorError> {
        debug!(url, policy = %request.format_policy, "spawning yt-dlp");

        let output = self.command(url, request).output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("Requested format is not available") {
                return Err(ExtractorError::NoStream);
            }
            return Err(ExtractorError::Download {
                status: output.status.code().unwrap_or(-1),
                detail: last_line(&stderr),
            });
        }

        let info: ExtractedInfo = serde_json::from_slice(&output.stdout)?;
        debug!(id = %info.id, ext = %info.ext, "yt-dlp completed");
        Ok(info)
    }
}

/// yt-dlp reports the operative failure on the final stderr line.
fn last_line(stderr: &str) -> String {
    stderr
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("no error output")
        .to_string()
}
