use super::*;

#[test]
fn builder_keeps_argument_order() {
    let cmd = ToolCommand::new("ffmpeg")
        .arg("-y")
        .args(["-i", "in.wav"])
        .arg(std::path::Path::new("out.mp4"));
    assert_eq!(cmd.args_lossy(), vec!["-y", "-i", "in.wav", "out.mp4"]);
    assert_eq!(cmd.last_arg(), Some(OsStr::new("out.mp4")));
    assert_eq!(cmd.display(), "ffmpeg -y -i in.wav out.mp4");
}

#[test]
fn run_checked_reports_exit_status_and_stderr() {
    let mut runner = ScriptedRunner::new(|_| ToolOutput::failed(2, "  bad input \n"))
        .with_available(["ffmpeg"]);
    let err = run_checked(&mut runner, &ToolCommand::new("ffmpeg")).unwrap_err();
    assert_eq!(err.to_string(), "ffmpeg failed: exit status 2: bad input");
}

#[test]
fn run_checked_passes_successful_output_through() {
    let mut runner =
        ScriptedRunner::new(|_| ToolOutput::ok_with_stdout("{}")).with_available(["ffprobe"]);
    let out = run_checked(&mut runner, &ToolCommand::new("ffprobe")).unwrap();
    assert_eq!(out.stdout, b"{}");
}

#[test]
fn scripted_runner_treats_unlisted_programs_as_missing() {
    let mut runner = ScriptedRunner::new(|_| ToolOutput::ok()).with_available(["ffmpeg"]);
    assert!(runner.is_available("ffmpeg"));
    assert!(!runner.is_available("espeak"));

    assert!(runner.run(&ToolCommand::new("espeak")).is_err());
    assert!(runner.run(&ToolCommand::new("ffmpeg").arg("-version")).is_ok());

    assert_eq!(runner.calls().len(), 2);
    assert_eq!(runner.calls_to("ffmpeg").count(), 1);
}

#[test]
fn system_runner_reports_missing_binary_as_spawn_error() {
    let mut runner = SystemRunner::new();
    let missing = "scriptreel-definitely-not-installed";
    assert!(!runner.is_available(missing));
    let err = runner.run(&ToolCommand::new(missing)).unwrap_err();
    assert!(matches!(err, ReelError::Tool { .. }));
}
