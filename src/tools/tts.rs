use std::path::Path;

use crate::foundation::core::truncate_chars;
use crate::tools::runner::ToolCommand;

/// Speaking rate passed to espeak, in words per minute.
pub const ESPEAK_RATE_WPM: u32 = 160;
/// Voice passed to espeak.
pub const ESPEAK_VOICE: &str = "en-us";
/// Language passed to pico2wave.
pub const PICO2WAVE_LANGUAGE: &str = "en-US";
/// Longest text pico2wave accepts on its command line, in characters.
pub const PICO2WAVE_TEXT_LIMIT: usize = 32767;

/// Speech engines tried in order before falling back to silence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TtsEngine {
    /// `espeak`, reading the narration file.
    Espeak,
    /// `pico2wave`, taking the (truncated) text as an argument.
    Pico2Wave,
}

impl TtsEngine {
    /// Preference order.
    pub const CHAIN: [TtsEngine; 2] = [TtsEngine::Espeak, TtsEngine::Pico2Wave];

    /// Executable name.
    pub fn program(self) -> &'static str {
        match self {
            TtsEngine::Espeak => "espeak",
            TtsEngine::Pico2Wave => "pico2wave",
        }
    }

    /// Build the synthesis command writing `audio_out`.
    pub fn command(self, narration_file: &Path, narration: &str, audio_out: &Path) -> ToolCommand {
        match self {
            TtsEngine::Espeak => espeak(narration_file, audio_out),
            TtsEngine::Pico2Wave => pico2wave(narration, audio_out),
        }
    }
}

/// `espeak -f <text file> -w <wav> -s 160 -v en-us`
pub fn espeak(narration_file: &Path, audio_out: &Path) -> ToolCommand {
    ToolCommand::new(TtsEngine::Espeak.program())
        .arg("-f")
        .arg(narration_file)
        .arg("-w")
        .arg(audio_out)
        .args(["-s", &ESPEAK_RATE_WPM.to_string(), "-v", ESPEAK_VOICE])
}

/// `pico2wave -l en-US -w <wav> <text>`, text cut to [`PICO2WAVE_TEXT_LIMIT`] characters.
pub fn pico2wave(narration: &str, audio_out: &Path) -> ToolCommand {
    ToolCommand::new(TtsEngine::Pico2Wave.program())
        .args(["-l", PICO2WAVE_LANGUAGE, "-w"])
        .arg(audio_out)
        .arg(truncate_chars(narration, PICO2WAVE_TEXT_LIMIT))
}

#[cfg(test)]
#[path = "../../tests/unit/tools/tts.rs"]
mod tests;
