use std::path::PathBuf;

use anyhow::Context;

use crate::foundation::error::ReelResult;
use crate::pipeline::job::{JobPaths, Staged};
use crate::script::scene::{Scene, total_duration_secs};
use crate::tools::ffmpeg;
use crate::tools::runner::{CommandRunner, run_checked};
use crate::tools::tts::TtsEngine;

/// Text read aloud: `"{title}\n{content}"` per scene with narration, blank-line separated.
pub fn build_narration_text(scenes: &[Scene]) -> String {
    scenes
        .iter()
        .filter(|s| s.has_narration())
        .map(|s| format!("{}\n{}", s.title, s.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Write the narration text and produce `<stem>_audio.wav`.
///
/// Tries each [`TtsEngine`] in order, then falls back to a silent track as long as the
/// scenes. Only a failure of the silent track is an error.
#[tracing::instrument(skip_all, fields(stem = %paths.stem))]
pub fn synthesize_narration(
    scenes: &[Scene],
    paths: &JobPaths,
    runner: &mut dyn CommandRunner,
) -> ReelResult<Staged<PathBuf>> {
    let audio_dir = paths.audio_dir();
    std::fs::create_dir_all(&audio_dir)
        .with_context(|| format!("create audio dir '{}'", audio_dir.display()))?;

    let narration = build_narration_text(scenes);
    let narration_file = paths.narration_text();
    std::fs::write(&narration_file, &narration)
        .with_context(|| format!("write narration text '{}'", narration_file.display()))?;
    tracing::info!(path = %narration_file.display(), "saved narration text");

    let audio = paths.audio();
    let mut fallbacks = Vec::new();

    for engine in TtsEngine::CHAIN {
        let program = engine.program();
        if !runner.is_available(program) {
            tracing::debug!(program, "tts engine not on PATH, skipping");
            fallbacks.push(format!("{program} not available, skipped"));
            continue;
        }
        let cmd = engine.command(&narration_file, &narration, &audio);
        match run_checked(runner, &cmd) {
            Ok(_) => {
                tracing::info!(program, path = %audio.display(), "generated narration audio");
                return Ok(Staged::with_fallbacks(audio, fallbacks));
            }
            Err(e) => {
                tracing::warn!(program, error = %e, "tts engine failed");
                fallbacks.push(format!("{program} failed: {e}"));
            }
        }
    }

    let secs = total_duration_secs(scenes);
    tracing::warn!(duration_secs = secs, "no TTS engine succeeded, generating silent audio track");
    run_checked(runner, &ffmpeg::silent_audio(&audio, secs))?;
    tracing::info!(path = %audio.display(), "generated silent audio");
    fallbacks.push(format!("silent audio track ({secs:.1}s) used in place of narration"));

    Ok(Staged::with_fallbacks(audio, fallbacks))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/narration.rs"]
mod tests;
