//! Run configuration.
//!
//! [`Config`] is built once at process entry and passed by reference into every component;
//! nothing below the binary reads the environment. [`ConfigArgs`] is the command-line view of
//! the same settings: every flag falls back to its environment variable, then to a default.
//!
//! | Env var            | Flag                 | Default                  |
//! |--------------------|----------------------|--------------------------|
//! | `REPO_ROOT`        | `--repo-root`        | current directory        |
//! | `SCRIPT_DIR`       | `--script-dir`       | `REPO_ROOT`              |
//! | `SCRIPT_PATTERN`   | `--script-pattern`   | `*SCRIPT*.md`            |
//! | `DEMO_URL`         | `--demo-url`         | --                       |
//! | `VIDEO_OUT_DIR`    | `--out-dir`          | `REPO_ROOT/video_output` |
//! | `VOICE_MODE`       | `--voice-mode`       | `local_tts`              |
//! | `VOICE_SAMPLE_WAV` | `--voice-sample-wav` | --                       |
//! | `VIDEO_RESOLUTION` | `--resolution`       | `1920x1080`              |
//! | `FPS`              | `--fps`              | `30`                     |
//! | `LLM_MODE`         | `--llm-mode`         | `local_llm`              |
//! | `HEADLESS`         | `--headless`         | `true`                   |

use std::path::{Path, PathBuf};

use crate::foundation::core::Resolution;
use crate::foundation::error::{ReelError, ReelResult};
use crate::script::scene::SceneTiming;

/// Default file-name glob for narration scripts.
pub const DEFAULT_SCRIPT_PATTERN: &str = "*SCRIPT*.md";
/// Default output directory name under the repository root.
pub const DEFAULT_OUT_DIR_NAME: &str = "video_output";
/// Default output frame rate.
pub const DEFAULT_FPS: u32 = 30;

/// Fully resolved settings for one run.
#[derive(Clone, Debug)]
pub struct Config {
    /// Repository root; anchors the default script and output directories.
    pub repo_root: PathBuf,
    /// Directory scanned for scripts.
    pub script_dir: PathBuf,
    /// File-name glob matched against entries of `script_dir`.
    pub script_pattern: String,
    /// Deployed demo URL. Carried for reporting only.
    pub demo_url: Option<String>,
    /// Root of every file the pipeline writes.
    pub video_out_dir: PathBuf,
    /// Voice mode label, echoed in render logs.
    pub voice_mode: String,
    /// Optional voice sample. Carried for reporting only.
    pub voice_sample_wav: Option<PathBuf>,
    /// Output video resolution.
    pub resolution: Resolution,
    /// Output frame rate.
    pub fps: u32,
    /// LLM mode label. Carried for reporting only.
    pub llm_mode: String,
    /// Headless browser flag. Carried for reporting only.
    pub headless: bool,
    /// Scene duration estimation parameters.
    pub timing: SceneTiming,
}

impl Config {
    /// Defaults anchored at `repo_root`.
    pub fn with_defaults(repo_root: impl Into<PathBuf>) -> Self {
        let repo_root = repo_root.into();
        Self {
            script_dir: repo_root.clone(),
            script_pattern: DEFAULT_SCRIPT_PATTERN.to_owned(),
            demo_url: None,
            video_out_dir: repo_root.join(DEFAULT_OUT_DIR_NAME),
            voice_mode: "local_tts".to_owned(),
            voice_sample_wav: None,
            resolution: Resolution::default(),
            fps: DEFAULT_FPS,
            llm_mode: "local_llm".to_owned(),
            headless: true,
            timing: SceneTiming::default(),
            repo_root,
        }
    }

    /// Reject settings the pipeline cannot honor.
    pub fn validate(&self) -> ReelResult<()> {
        self.resolution.validate()?;
        if self.fps == 0 {
            return Err(ReelError::validation("fps must be non-zero"));
        }
        if self.script_pattern.trim().is_empty() {
            return Err(ReelError::validation("script pattern must not be empty"));
        }
        self.timing.validate()
    }
}

/// Command-line and environment view of [`Config`].
#[derive(clap::Args, Clone, Debug)]
pub struct ConfigArgs {
    /// Repository root (defaults to the current directory).
    #[arg(long, env = "REPO_ROOT")]
    pub repo_root: Option<String>,

    /// Directory containing narration scripts (defaults to the repository root).
    #[arg(long, env = "SCRIPT_DIR")]
    pub script_dir: Option<String>,

    /// File-name glob for narration scripts.
    #[arg(long, env = "SCRIPT_PATTERN", default_value = DEFAULT_SCRIPT_PATTERN)]
    pub script_pattern: String,

    /// Deployed demo URL.
    #[arg(long, env = "DEMO_URL")]
    pub demo_url: Option<String>,

    /// Output directory (defaults to `<repo-root>/video_output`).
    #[arg(long = "out-dir", env = "VIDEO_OUT_DIR")]
    pub video_out_dir: Option<String>,

    /// Voice mode label.
    #[arg(long, env = "VOICE_MODE", default_value = "local_tts")]
    pub voice_mode: String,

    /// Voice sample WAV file.
    #[arg(long, env = "VOICE_SAMPLE_WAV")]
    pub voice_sample_wav: Option<String>,

    /// Output resolution as WIDTHxHEIGHT.
    #[arg(long, env = "VIDEO_RESOLUTION", default_value = "1920x1080")]
    pub resolution: Resolution,

    /// Output frames per second.
    #[arg(long, env = "FPS", default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// LLM mode label.
    #[arg(long, env = "LLM_MODE", default_value = "local_llm")]
    pub llm_mode: String,

    /// Headless browser mode (`true` enables, anything else disables).
    #[arg(long, env = "HEADLESS", default_value = "true")]
    pub headless: String,
}

impl ConfigArgs {
    /// Resolve into a validated [`Config`]; `cwd` stands in for a missing repository root.
    pub fn into_config(self, cwd: &Path) -> ReelResult<Config> {
        let repo_root = non_empty_path(self.repo_root).unwrap_or_else(|| cwd.to_path_buf());
        let mut cfg = Config::with_defaults(repo_root);

        if let Some(dir) = non_empty_path(self.script_dir) {
            cfg.script_dir = dir;
        }
        if let Some(dir) = non_empty_path(self.video_out_dir) {
            cfg.video_out_dir = dir;
        }
        cfg.script_pattern = self.script_pattern;
        cfg.demo_url = self.demo_url.filter(|s| !s.trim().is_empty());
        cfg.voice_mode = self.voice_mode;
        cfg.voice_sample_wav = non_empty_path(self.voice_sample_wav);
        cfg.resolution = self.resolution;
        cfg.fps = self.fps;
        cfg.llm_mode = self.llm_mode;
        cfg.headless = self.headless.trim().eq_ignore_ascii_case("true");

        cfg.validate()?;
        Ok(cfg)
    }
}

// Paths are taken as plain strings so that an exported-but-empty variable reaches this point
// and means "unset".
fn non_empty_path(p: Option<String>) -> Option<PathBuf> {
    p.filter(|p| !p.trim().is_empty()).map(PathBuf::from)
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
