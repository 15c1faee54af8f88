use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Context;

use crate::config::Config;
use crate::foundation::error::ReelResult;
use crate::pipeline::job::VideoJob;

/// Timestamp format used in the `Generated:` line.
pub const GENERATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render the log text for `job`.
pub fn format_render_log(job: &VideoJob, config: &Config, generated_at: &str) -> String {
    let output = job.output_path();
    let output_name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let output_abs = std::path::absolute(&output).unwrap_or(output);

    let mut log = String::new();
    let _ = writeln!(log, "Video Render Log");
    let _ = writeln!(log, "{}", "=".repeat(80));
    let _ = writeln!(log);
    let _ = writeln!(log, "Script: {}", job.script_name());
    let _ = writeln!(log, "Output: {output_name}");
    let _ = writeln!(log, "Generated: {generated_at}");
    let _ = writeln!(log);
    let _ = writeln!(log, "Configuration:");
    let _ = writeln!(log, "- Resolution: {}", config.resolution);
    let _ = writeln!(log, "- FPS: {}", config.fps);
    let _ = writeln!(log, "- Voice Mode: {}", config.voice_mode);
    let _ = writeln!(log, "- Scenes: {}", job.scenes.len());
    let _ = writeln!(log, "- Total Duration: {:.1}s", job.total_duration_secs);
    let _ = writeln!(log);
    let _ = writeln!(log, "Scenes:");

    for scene in &job.scenes {
        let _ = writeln!(log);
        let _ = writeln!(
            log,
            "{}. {} ({:.1}s)",
            scene.index + 1,
            scene.title,
            scene.duration_secs
        );
        if let Some(tc) = &scene.timecode {
            let _ = writeln!(log, "   Timecode: {tc}");
        }
        if !scene.visual_notes.is_empty() {
            let _ = writeln!(log, "   Visuals: {}", scene.visual_notes);
        }
    }

    if !job.fallbacks.is_empty() {
        let _ = writeln!(log);
        let _ = writeln!(log, "Fallbacks Used:");
        for fallback in &job.fallbacks {
            let _ = writeln!(log, "- {fallback}");
        }
    }

    let _ = writeln!(log);
    let _ = writeln!(log, "Output Path: {}", output_abs.display());
    log
}

/// Write `<stem>_video.log.txt` next to the video.
pub fn write_render_log(job: &VideoJob, config: &Config) -> ReelResult<PathBuf> {
    let generated_at = chrono::Local::now().format(GENERATED_AT_FORMAT).to_string();
    let path = job.paths.render_log();
    std::fs::write(&path, format_render_log(job, config, &generated_at))
        .with_context(|| format!("write render log '{}'", path.display()))?;
    tracing::info!(path = %path.display(), "generated render log");
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/report.rs"]
mod tests;
