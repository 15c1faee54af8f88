use super::*;
use crate::pipeline::job::JobState;
use crate::tools::runner::{ScriptedRunner, ToolCommand, ToolOutput};

const TWO_SCENES: &str = "## Intro (0:00-0:10)\nHello [ON SCREEN: Logo]\n\n## Outro\nBye\n";

fn touch_output(cmd: &ToolCommand) -> ToolOutput {
    if cmd.program == "ffprobe" {
        return ToolOutput::ok_with_stdout("{}");
    }
    if let Some(out) = cmd.last_arg() {
        std::fs::write(out, b"data").unwrap();
    }
    ToolOutput::ok()
}

fn config(root: &Path) -> Config {
    Config::with_defaults(root)
}

#[test]
fn prepare_creates_output_dir_and_rejects_bad_config() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());
    let mut runner = ScriptedRunner::new(touch_output);
    Producer::prepare(&cfg, &mut runner).unwrap();
    assert!(cfg.video_out_dir.is_dir());

    let mut bad = config(dir.path());
    bad.fps = 0;
    let mut runner = ScriptedRunner::new(touch_output);
    assert!(Producer::prepare(&bad, &mut runner).is_err());
}

#[test]
fn process_script_runs_every_stage() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("DEMO_SCRIPT.md");
    std::fs::write(&script, TWO_SCENES).unwrap();
    let cfg = config(dir.path());
    let mut runner = ScriptedRunner::new(touch_output).with_available(["ffmpeg", "ffprobe"]);

    let job = Producer::prepare(&cfg, &mut runner)
        .unwrap()
        .with_fonts(FontSet::default())
        .process_script(&script);

    assert_eq!(job.state, JobState::Logged);
    assert_eq!(job.scenes.len(), 2);
    assert_eq!(job.total_duration_secs, 13.0);
    assert_eq!(job.audio_path, Some(job.paths.audio()));
    assert_eq!(job.visuals.len(), 2);
    assert!(job.output_path().is_file());
    assert!(job.paths.render_log().is_file());
    assert!(job.fallbacks.iter().any(|f| f.starts_with("silent audio track")));
}

#[test]
fn script_without_headings_fails_at_parse() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("EMPTY_SCRIPT.md");
    std::fs::write(&script, "just prose, no headings\n").unwrap();
    let cfg = config(dir.path());
    let mut runner = ScriptedRunner::new(touch_output).with_available(["ffmpeg"]);

    let mut producer = Producer::prepare(&cfg, &mut runner).unwrap();
    let job = producer.process_script(&script);

    assert!(matches!(job.state, JobState::Failed { stage: Stage::Parse, .. }));
    assert!(job.fallbacks[0].starts_with("Error: validation error: no scenes found"));
    drop(producer);
    assert!(runner.calls().is_empty());
}

#[test]
fn failed_visuals_stop_the_job_before_render() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("DEMO_SCRIPT.md");
    std::fs::write(&script, TWO_SCENES).unwrap();
    let cfg = config(dir.path());
    let mut runner = ScriptedRunner::new(|cmd| {
        if cmd.last_arg().is_some_and(|a| a.to_string_lossy().ends_with(".png")) {
            ToolOutput::failed(1, "no lavfi")
        } else {
            touch_output(cmd)
        }
    })
    .with_available(["ffmpeg"]);

    let job = Producer::prepare(&cfg, &mut runner)
        .unwrap()
        .with_fonts(FontSet::default())
        .process_script(&script);

    assert!(matches!(job.state, JobState::Failed { stage: Stage::Render, .. }));
    assert!(!job.output_path().exists());
    assert!(!job.paths.render_log().exists());
    assert!(job
        .fallbacks
        .last()
        .unwrap()
        .contains("cannot render video without visual assets"));
}

#[test]
fn run_with_no_matches_is_an_empty_summary() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());
    let mut runner = ScriptedRunner::new(touch_output);

    let summary = Producer::prepare(&cfg, &mut runner).unwrap().run().unwrap();
    assert_eq!(summary.discovered, 0);
    assert!(summary.jobs.is_empty());
}

#[test]
fn run_with_missing_script_dir_is_an_empty_summary() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(dir.path());
    cfg.script_dir = dir.path().join("does_not_exist");
    let mut runner = ScriptedRunner::new(touch_output);

    let summary = Producer::prepare(&cfg, &mut runner).unwrap().run().unwrap();
    assert_eq!(summary.discovered, 0);
    assert!(summary.jobs.is_empty());
}
