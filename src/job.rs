//! JSON encode-job manifests.
//!
//! ```json
//! {
//!   "settings": { "width": 64, "height": 48 },
//!   "streams": [
//!     { "fps": 25, "frames": ["frames/0001.png", "frames/0002.png"] },
//!     { "fps": 5, "width": 32, "height": 24, "frames": ["thumb.png"] }
//!   ]
//! }
//! ```
//!
//! Frame paths are relative to the manifest's directory. Stream dimensions default to those
//! of the stream's first frame; settings default to the first stream's dimensions.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::stream::MAX_STREAMS;
use crate::foundation::core::{Settings, ensure_dimensions};
use crate::foundation::error::{AviError, AviResult};

/// A whole output file: optional global settings and its streams.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EncodeJob {
    /// Global dimensions for the main header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
    /// Streams in index order.
    pub streams: Vec<StreamJob>,
}

/// One stream of an [`EncodeJob`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StreamJob {
    /// Frames per second.
    pub fps: u32,
    /// Width in pixels; taken from the first frame when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Height in pixels; taken from the first frame when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Image files in temporal order.
    #[serde(default)]
    pub frames: Vec<PathBuf>,
}

impl EncodeJob {
    /// Read and validate a manifest.
    pub fn from_path(path: &Path) -> AviResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read job manifest '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a manifest.
    pub fn from_json_str(json: &str) -> AviResult<Self> {
        let job: Self = serde_json::from_str(json)?;
        job.validate()?;
        Ok(job)
    }

    /// Check values that can be checked without decoding frames.
    pub fn validate(&self) -> AviResult<()> {
        if let Some(s) = self.settings {
            ensure_dimensions("job settings", s.width, s.height)?;
        }
        if self.streams.len() > MAX_STREAMS {
            return Err(AviError::validation(format!(
                "job has {} streams, at most {MAX_STREAMS} are supported",
                self.streams.len()
            )));
        }
        for (i, stream) in self.streams.iter().enumerate() {
            if stream.fps == 0 {
                return Err(AviError::validation(format!(
                    "stream {i}: fps must be non-zero"
                )));
            }
            match (stream.width, stream.height) {
                (Some(w), Some(h)) => ensure_dimensions(&format!("stream {i}"), w, h)?,
                (None, None) if stream.frames.is_empty() => {
                    return Err(AviError::validation(format!(
                        "stream {i} has no frames and no width/height"
                    )));
                }
                (None, None) => {}
                _ => {
                    return Err(AviError::validation(format!(
                        "stream {i} must give both width and height, or neither"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Global settings, or `fallback` when the manifest has none.
    pub fn settings_or(&self, fallback: Settings) -> Settings {
        self.settings.unwrap_or(fallback)
    }
}

impl StreamJob {
    /// Declared dimensions, when both are present.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.width.zip(self.height)
    }

    /// Frame paths resolved against `root` (absolute paths are kept as-is).
    pub fn frame_paths(&self, root: &Path) -> Vec<PathBuf> {
        self.frames.iter().map(|p| root.join(p)).collect()
    }
}

#[cfg(test)]
#[path = "../tests/unit/job.rs"]
mod tests;
