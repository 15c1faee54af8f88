use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{ReelError, ReelResult};
use crate::pipeline::job::{JobPaths, Staged};
use crate::script::scene::Scene;
use crate::tools::ffmpeg;
use crate::tools::probe::{self, MediaInfo};
use crate::tools::runner::{CommandRunner, run_checked};

/// An encoded video and whatever `ffprobe` could tell about it.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedVideo {
    /// Output MP4.
    pub path: PathBuf,
    /// Probe result; `None` when probing failed.
    pub info: Option<MediaInfo>,
}

/// Concat-demuxer manifest pairing each existing image with its scene's duration.
///
/// Images that do not exist are skipped. The last included image is listed once more without
/// a duration so the demuxer holds it for its full length. Returns `None` when no image is
/// left.
pub fn build_concat_manifest(scenes: &[Scene], visuals: &[PathBuf]) -> ReelResult<Option<String>> {
    let mut manifest = String::new();
    let mut last = None;

    for (scene, image) in scenes.iter().zip(visuals) {
        if !image.exists() {
            tracing::debug!(path = %image.display(), "skipping missing scene image");
            continue;
        }
        let quoted = quote_path(image)?;
        let _ = writeln!(manifest, "file {quoted}");
        let _ = writeln!(manifest, "duration {:.3}", scene.duration_secs);
        last = Some(quoted);
    }

    let Some(last) = last else {
        return Ok(None);
    };
    let _ = writeln!(manifest, "file {last}");
    Ok(Some(manifest))
}

// Absolute path in single quotes, embedded quotes written as '\''.
fn quote_path(path: &Path) -> ReelResult<String> {
    let abs = std::path::absolute(path)
        .with_context(|| format!("resolve absolute path of '{}'", path.display()))?;
    Ok(format!("'{}'", abs.to_string_lossy().replace('\'', r"'\''")))
}

/// Encode the scene images against `audio` into `<stem>_video.mp4`.
///
/// Fails before touching the filesystem when no scene image exists. The follow-up probe is
/// informational only.
#[tracing::instrument(skip_all, fields(stem = %paths.stem))]
pub fn render_video(
    scenes: &[Scene],
    audio: &Path,
    visuals: &[PathBuf],
    paths: &JobPaths,
    fps: u32,
    runner: &mut dyn CommandRunner,
) -> ReelResult<Staged<RenderedVideo>> {
    let out = paths.video();
    tracing::info!(output = %out.display(), "rendering video");

    let Some(manifest) = build_concat_manifest(scenes, visuals)? else {
        tracing::error!("no visual assets to render");
        return Err(ReelError::validation(
            "cannot render video without visual assets",
        ));
    };

    let manifest_path = paths.concat_manifest();
    std::fs::write(&manifest_path, manifest)
        .with_context(|| format!("write concat manifest '{}'", manifest_path.display()))?;
    tracing::info!(path = %manifest_path.display(), "created concat file");

    let cmd = ffmpeg::concat_render(&manifest_path, audio, &out, fps);
    tracing::info!(command = %cmd.display(), "running ffmpeg");
    run_checked(runner, &cmd)?;
    tracing::info!(path = %out.display(), "video rendered successfully");

    let info = probe_video(&out, runner);
    Ok(Staged::clean(RenderedVideo { path: out, info }))
}

fn probe_video(video: &Path, runner: &mut dyn CommandRunner) -> Option<MediaInfo> {
    let out = match run_checked(runner, &probe::ffprobe(video)) {
        Ok(out) => out,
        Err(e) => {
            tracing::debug!(error = %e, "ffprobe unavailable or failed");
            return None;
        }
    };
    let info = match probe::parse_probe_json(&out.stdout) {
        Ok(info) => info,
        Err(e) => {
            tracing::debug!(error = %e, "ignoring unreadable ffprobe output");
            return None;
        }
    };
    tracing::info!(
        duration_secs = format_args!("{:.1}", info.duration_secs.unwrap_or(0.0)),
        size_mb = format_args!("{:.1}", info.size_mib().unwrap_or(0.0)),
        "video probed"
    );
    Some(info)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/render.rs"]
mod tests;
