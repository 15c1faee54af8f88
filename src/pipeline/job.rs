use std::fmt;
use std::path::{Path, PathBuf};

use crate::foundation::error::ReelResult;
use crate::script::scene::{Scene, total_duration_secs};

/// Every file written for one script, derived from the output directory and the script stem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobPaths {
    /// Output directory root.
    pub out_dir: PathBuf,
    /// Script file stem shared by all outputs.
    pub stem: String,
}

impl JobPaths {
    /// Layout for `script` under `out_dir`.
    pub fn for_script(out_dir: &Path, script: &Path) -> Self {
        let stem = script
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "script".to_owned());
        Self {
            out_dir: out_dir.to_path_buf(),
            stem,
        }
    }

    /// `<out>/audio`
    pub fn audio_dir(&self) -> PathBuf {
        self.out_dir.join("audio")
    }

    /// `<out>/visuals`
    pub fn visuals_dir(&self) -> PathBuf {
        self.out_dir.join("visuals")
    }

    /// `<out>/audio/<stem>_narration.txt`
    pub fn narration_text(&self) -> PathBuf {
        self.audio_dir().join(format!("{}_narration.txt", self.stem))
    }

    /// `<out>/audio/<stem>_audio.wav`
    pub fn audio(&self) -> PathBuf {
        self.audio_dir().join(format!("{}_audio.wav", self.stem))
    }

    /// `<out>/visuals/<stem>_scene_NNN.png`
    pub fn scene_image(&self, index: usize) -> PathBuf {
        self.visuals_dir()
            .join(format!("{}_scene_{index:03}.png", self.stem))
    }

    /// `<out>/<stem>_concat.txt`
    pub fn concat_manifest(&self) -> PathBuf {
        self.out_dir.join(format!("{}_concat.txt", self.stem))
    }

    /// `<out>/<stem>_video.mp4`
    pub fn video(&self) -> PathBuf {
        self.out_dir.join(format!("{}_video.mp4", self.stem))
    }

    /// `<out>/<stem>_video.log.txt`
    pub fn render_log(&self) -> PathBuf {
        self.out_dir.join(format!("{}_video.log.txt", self.stem))
    }
}

/// Pipeline stages of one job, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Script parsing.
    Parse,
    /// Narration synthesis.
    Audio,
    /// Title card generation.
    Visuals,
    /// Final encode.
    Render,
    /// Render log output.
    Log,
}

impl Stage {
    fn completed(self) -> JobState {
        match self {
            Stage::Parse => JobState::Parsed,
            Stage::Audio => JobState::AudioReady,
            Stage::Visuals => JobState::VisualsReady,
            Stage::Render => JobState::Rendered,
            Stage::Log => JobState::Logged,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Parse => "parse",
            Stage::Audio => "audio",
            Stage::Visuals => "visuals",
            Stage::Render => "render",
            Stage::Log => "log",
        })
    }
}

/// Where a job is in `scanned → parsed → audio-ready → visuals-ready → rendered → logged`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobState {
    /// Discovered, nothing run yet.
    Scanned,
    /// Scenes parsed.
    Parsed,
    /// Narration track written.
    AudioReady,
    /// Title cards written.
    VisualsReady,
    /// Video encoded.
    Rendered,
    /// Render log written; the job is complete.
    Logged,
    /// A stage failed; later stages did not run.
    Failed {
        /// Stage that failed.
        stage: Stage,
        /// Error message.
        reason: String,
    },
}

/// A stage's value plus the fallback events it produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Staged<T> {
    /// Stage output.
    pub value: T,
    /// Human-readable fallback events, in the order they happened.
    pub fallbacks: Vec<String>,
}

impl<T> Staged<T> {
    /// Output with no fallbacks.
    pub fn clean(value: T) -> Self {
        Self {
            value,
            fallbacks: Vec::new(),
        }
    }

    /// Output with the given fallbacks.
    pub fn with_fallbacks(value: T, fallbacks: Vec<String>) -> Self {
        Self { value, fallbacks }
    }
}

/// One script's trip through the pipeline.
#[derive(Clone, Debug)]
pub struct VideoJob {
    /// Source script.
    pub script_path: PathBuf,
    /// Output layout.
    pub paths: JobPaths,
    /// Parsed scenes, in order.
    pub scenes: Vec<Scene>,
    /// Narration track, once synthesized.
    pub audio_path: Option<PathBuf>,
    /// Scene images, once generated (index-aligned with `scenes`).
    pub visuals: Vec<PathBuf>,
    /// Sum of scene durations.
    pub total_duration_secs: f64,
    /// Fallback events and, on failure, an `Error: ...` entry.
    pub fallbacks: Vec<String>,
    /// Current state.
    pub state: JobState,
}

impl VideoJob {
    /// Fresh job for `script`.
    pub fn new(script_path: impl Into<PathBuf>, paths: JobPaths) -> Self {
        Self {
            script_path: script_path.into(),
            paths,
            scenes: Vec::new(),
            audio_path: None,
            visuals: Vec::new(),
            total_duration_secs: 0.0,
            fallbacks: Vec::new(),
            state: JobState::Scanned,
        }
    }

    /// Destination video path.
    pub fn output_path(&self) -> PathBuf {
        self.paths.video()
    }

    /// Script file name for display.
    pub fn script_name(&self) -> String {
        self.script_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.script_path.display().to_string())
    }

    /// Store parsed scenes and their total duration.
    pub fn set_scenes(&mut self, scenes: Vec<Scene>) {
        self.total_duration_secs = total_duration_secs(&scenes);
        self.scenes = scenes;
    }

    /// `true` once the video and its log are written.
    pub fn is_complete(&self) -> bool {
        self.state == JobState::Logged
    }

    /// `true` when a stage failed.
    pub fn is_failed(&self) -> bool {
        matches!(self.state, JobState::Failed { .. })
    }

    /// Apply a stage result.
    ///
    /// Success merges the stage's fallbacks, moves to the stage's completed state and hands back
    /// the value. Failure records `Failed` plus an `Error: ...` fallback entry and returns `None`.
    /// A job that already failed ignores further results.
    pub fn advance<T>(&mut self, stage: Stage, result: ReelResult<Staged<T>>) -> Option<T> {
        if self.is_failed() {
            return None;
        }
        match result {
            Ok(staged) => {
                self.fallbacks.extend(staged.fallbacks);
                self.state = stage.completed();
                Some(staged.value)
            }
            Err(e) => {
                let reason = e.to_string();
                tracing::error!(
                    script = %self.script_name(),
                    %stage,
                    error = %reason,
                    "stage failed"
                );
                self.fallbacks.push(format!("Error: {reason}"));
                self.state = JobState::Failed { stage, reason };
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/job.rs"]
mod tests;
