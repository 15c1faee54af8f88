use std::path::Path;

use crate::foundation::error::{ReelError, ReelResult};
use crate::tools::runner::ToolCommand;

/// Media probe program name.
pub const FFPROBE: &str = "ffprobe";

/// Container-level facts read from `ffprobe`. Fields are `None` when not reported.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MediaInfo {
    /// Container duration in seconds.
    pub duration_secs: Option<f64>,
    /// File size in bytes.
    pub size_bytes: Option<u64>,
}

impl MediaInfo {
    /// Size in mebibytes, when known.
    pub fn size_mib(&self) -> Option<f64> {
        self.size_bytes.map(|b| b as f64 / (1024.0 * 1024.0))
    }
}

/// `ffprobe -v quiet -print_format json -show_format -show_streams <media>`
pub fn ffprobe(media: &Path) -> ToolCommand {
    ToolCommand::new(FFPROBE)
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(media)
}

// ffprobe prints numbers as JSON strings; accept both.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Numeric::Number(n) => Some(*n),
            Numeric::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(serde::Deserialize)]
struct ProbeFormat {
    duration: Option<Numeric>,
    size: Option<Numeric>,
}

#[derive(serde::Deserialize)]
struct ProbeOut {
    format: Option<ProbeFormat>,
}

/// Parse the JSON printed by [`ffprobe`].
pub fn parse_probe_json(stdout: &[u8]) -> ReelResult<MediaInfo> {
    let parsed: ProbeOut = serde_json::from_slice(stdout)
        .map_err(|e| ReelError::serde(format!("ffprobe json parse failed: {e}")))?;
    let Some(format) = parsed.format else {
        return Ok(MediaInfo::default());
    };

    Ok(MediaInfo {
        duration_secs: format.duration.as_ref().and_then(Numeric::as_f64),
        size_bytes: format
            .size
            .as_ref()
            .and_then(Numeric::as_f64)
            .filter(|s| *s >= 0.0)
            .map(|s| s as u64),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/tools/probe.rs"]
mod tests;
