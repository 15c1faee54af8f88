use super::*;

#[test]
fn espeak_reads_the_narration_file() {
    let cmd = espeak(Path::new("a/n.txt"), Path::new("a/n.wav"));
    assert_eq!(cmd.program, "espeak");
    assert_eq!(
        cmd.args_lossy(),
        vec!["-f", "a/n.txt", "-w", "a/n.wav", "-s", "160", "-v", "en-us"]
    );
}

#[test]
fn pico2wave_truncates_text_to_its_limit() {
    let long = "x".repeat(PICO2WAVE_TEXT_LIMIT + 50);
    let cmd = pico2wave(&long, Path::new("n.wav"));
    let args = cmd.args_lossy();
    assert_eq!(&args[..4], &["-l", "en-US", "-w", "n.wav"]);
    assert_eq!(args[4].chars().count(), PICO2WAVE_TEXT_LIMIT);
}

#[test]
fn engine_chain_prefers_espeak() {
    assert_eq!(TtsEngine::CHAIN[0].program(), "espeak");
    assert_eq!(TtsEngine::CHAIN[1].program(), "pico2wave");

    let cmd = TtsEngine::Pico2Wave.command(Path::new("n.txt"), "Hi", Path::new("n.wav"));
    assert_eq!(cmd.last_arg(), Some(std::ffi::OsStr::new("Hi")));
}
