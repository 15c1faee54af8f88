use std::path::Path;

use super::*;
use crate::pipeline::job::JobPaths;
use crate::script::scene::Scene;

fn job() -> VideoJob {
    let paths = JobPaths::for_script(Path::new("/out"), Path::new("/scripts/DEMO_SCRIPT.md"));
    let mut job = VideoJob::new("/scripts/DEMO_SCRIPT.md", paths);
    job.set_scenes(vec![
        Scene {
            index: 0,
            title: "Intro (0:00-0:10)".to_owned(),
            content: "Hello".to_owned(),
            timecode: Some("0:00-0:10".to_owned()),
            duration_secs: 10.0,
            visual_notes: "Logo".to_owned(),
        },
        Scene {
            index: 1,
            title: "Outro".to_owned(),
            content: "Bye".to_owned(),
            timecode: None,
            duration_secs: 3.0,
            visual_notes: String::new(),
        },
    ]);
    job
}

#[test]
fn log_lists_configuration_and_scenes() {
    let config = Config::with_defaults("/repo");
    let text = format_render_log(&job(), &config, "2026-01-02 03:04:05");

    let expected_head = format!(
        "Video Render Log\n{}\n\nScript: DEMO_SCRIPT.md\nOutput: DEMO_SCRIPT_video.mp4\n\
         Generated: 2026-01-02 03:04:05\n\nConfiguration:\n- Resolution: 1920x1080\n- FPS: 30\n\
         - Voice Mode: local_tts\n- Scenes: 2\n- Total Duration: 13.0s\n\nScenes:\n",
        "=".repeat(80)
    );
    assert!(text.starts_with(&expected_head), "{text}");
    assert!(text.contains(
        "\n1. Intro (0:00-0:10) (10.0s)\n   Timecode: 0:00-0:10\n   Visuals: Logo\n"
    ));
    assert!(text.contains("\n2. Outro (3.0s)\n\n"));
    assert!(!text.contains("Fallbacks Used:"));
    assert!(text.ends_with("Output Path: /out/DEMO_SCRIPT_video.mp4\n"));
}

#[test]
fn fallbacks_are_listed_when_present() {
    let mut job = job();
    job.fallbacks.push("espeak not available, skipped".to_owned());
    let text = format_render_log(&job, &Config::with_defaults("/repo"), "now");
    assert!(text.contains("\nFallbacks Used:\n- espeak not available, skipped\n"));
}

#[test]
fn writes_log_next_to_video() {
    let dir = tempfile::tempdir().unwrap();
    let paths = JobPaths::for_script(dir.path(), Path::new("DEMO_SCRIPT.md"));
    let mut job = job();
    job.paths = paths.clone();

    let written = write_render_log(&job, &Config::with_defaults(dir.path())).unwrap();
    assert_eq!(written, paths.render_log());
    let text = std::fs::read_to_string(written).unwrap();
    assert!(text.contains("- Scenes: 2"));
}
