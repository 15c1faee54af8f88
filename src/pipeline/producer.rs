use std::path::Path;

use anyhow::Context;

use crate::config::Config;
use crate::foundation::error::{ReelError, ReelResult};
use crate::pipeline::job::{JobPaths, Stage, Staged, VideoJob};
use crate::pipeline::narration::synthesize_narration;
use crate::pipeline::render::render_video;
use crate::pipeline::report::write_render_log;
use crate::pipeline::visuals::generate_visuals;
use crate::script::parse::parse_script_file;
use crate::script::scan::scan_scripts;
use crate::script::scene::Scene;
use crate::tools::ffmpeg::FFMPEG;
use crate::tools::fonts::FontSet;
use crate::tools::runner::CommandRunner;

/// Outcome of one batch run.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    /// Scripts matched by the scan.
    pub discovered: usize,
    /// One job per discovered script, in scan order.
    pub jobs: Vec<VideoJob>,
}

impl RunSummary {
    /// Jobs that produced a video and its log.
    pub fn produced(&self) -> usize {
        self.jobs.iter().filter(|j| j.is_complete()).count()
    }

    /// Jobs that stopped at a failed stage.
    pub fn failed(&self) -> usize {
        self.jobs.iter().filter(|j| j.is_failed()).count()
    }
}

/// Drives every discovered script through parse, audio, visuals, render and log.
pub struct Producer<'a> {
    config: &'a Config,
    runner: &'a mut dyn CommandRunner,
    fonts: FontSet,
}

impl<'a> Producer<'a> {
    /// Create the output directory, report tool availability and resolve card fonts.
    pub fn prepare(config: &'a Config, runner: &'a mut dyn CommandRunner) -> ReelResult<Self> {
        config.validate()?;
        std::fs::create_dir_all(&config.video_out_dir).with_context(|| {
            format!(
                "create output directory '{}'",
                config.video_out_dir.display()
            )
        })?;

        if runner.is_available(FFMPEG) {
            tracing::info!("ffmpeg found");
        } else {
            tracing::warn!("ffmpeg not found on PATH, video rendering will fail");
        }
        tracing::info!(
            repo_root = %config.repo_root.display(),
            script_dir = %config.script_dir.display(),
            output = %config.video_out_dir.display(),
            resolution = %config.resolution,
            fps = config.fps,
            voice_mode = %config.voice_mode,
            "video producer ready"
        );

        Ok(Self {
            config,
            runner,
            fonts: FontSet::probe(),
        })
    }

    /// Replace the probed card fonts.
    pub fn with_fonts(mut self, fonts: FontSet) -> Self {
        self.fonts = fonts;
        self
    }

    /// Run one script through every stage. Failures are recorded on the returned job.
    #[tracing::instrument(skip_all, fields(script = %script.display()))]
    pub fn process_script(&mut self, script: &Path) -> VideoJob {
        let paths = JobPaths::for_script(&self.config.video_out_dir, script);
        let mut job = VideoJob::new(script, paths);
        tracing::info!("processing script");

        let parsed = load_scenes(script, self.config);
        let Some(scenes) = job.advance(Stage::Parse, parsed) else {
            return job;
        };
        job.set_scenes(scenes);
        tracing::info!(
            scenes = job.scenes.len(),
            total_duration_secs = job.total_duration_secs,
            "scene timeline ready"
        );

        let audio = synthesize_narration(&job.scenes, &job.paths, self.runner);
        let Some(audio) = job.advance(Stage::Audio, audio) else {
            return job;
        };
        job.audio_path = Some(audio.clone());

        let visuals = generate_visuals(
            &job.scenes,
            &job.paths,
            self.config.resolution,
            &self.fonts,
            self.runner,
        );
        let Some(visuals) = job.advance(Stage::Visuals, visuals) else {
            return job;
        };
        job.visuals = visuals;

        let rendered = render_video(
            &job.scenes,
            &audio,
            &job.visuals,
            &job.paths,
            self.config.fps,
            self.runner,
        );
        if job.advance(Stage::Render, rendered).is_none() {
            return job;
        }

        let logged = write_render_log(&job, self.config).map(Staged::clean);
        if job.advance(Stage::Log, logged).is_some() {
            tracing::info!(output = %job.output_path().display(), "successfully generated video");
        }
        job
    }

    /// Scan for scripts and process each one. One failed script never stops the batch.
    pub fn run(&mut self) -> ReelResult<RunSummary> {
        let scripts = scan_scripts(&self.config.script_dir, &self.config.script_pattern)?;
        let mut summary = RunSummary {
            discovered: scripts.len(),
            jobs: Vec::with_capacity(scripts.len()),
        };

        if scripts.is_empty() {
            tracing::warn!(
                dir = %self.config.script_dir.display(),
                pattern = %self.config.script_pattern,
                "no scripts found matching pattern"
            );
            return Ok(summary);
        }

        for script in &scripts {
            let job = self.process_script(script);
            summary.jobs.push(job);
        }

        log_summary(&summary, self.config);
        Ok(summary)
    }
}

fn load_scenes(script: &Path, config: &Config) -> ReelResult<Staged<Vec<Scene>>> {
    let scenes = parse_script_file(script, &config.timing)?;
    if scenes.is_empty() {
        return Err(ReelError::validation(format!(
            "no scenes found in '{}' (expected '##' or '###' headings)",
            script.display()
        )));
    }
    Ok(Staged::clean(scenes))
}

fn log_summary(summary: &RunSummary, config: &Config) {
    tracing::info!(
        discovered = summary.discovered,
        generated = summary.produced(),
        failed = summary.failed(),
        output = %config.video_out_dir.display(),
        "video production complete"
    );
    for job in &summary.jobs {
        tracing::info!(
            script = %job.script_name(),
            scenes = job.scenes.len(),
            duration_secs = format_args!("{:.1}", job.total_duration_secs),
            fallbacks = job.fallbacks.len(),
            state = ?job.state,
            "job summary"
        );
        for fallback in &job.fallbacks {
            tracing::info!(script = %job.script_name(), "fallback: {fallback}");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/producer.rs"]
mod tests;
