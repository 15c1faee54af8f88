//! Typed `ffmpeg` invocations: silent audio, title cards and the final concat render.
//!
//! Builders only assemble argument vectors; running them is the caller's business (see
//! [`crate::tools::runner`]).

use std::path::Path;

use crate::foundation::core::{Resolution, Rgb, truncate_chars};
use crate::tools::fonts::FontSet;
use crate::tools::runner::ToolCommand;

/// Encoder program name.
pub const FFMPEG: &str = "ffmpeg";

/// Sample rate of the generated silent track.
pub const SILENT_SAMPLE_RATE: u32 = 44_100;

/// Title text size in pixels.
pub const TITLE_FONT_SIZE: u32 = 72;
/// Subtitle text size in pixels.
pub const SUBTITLE_FONT_SIZE: u32 = 36;
/// Title baseline offset from the vertical center (negative is up).
pub const TITLE_Y_OFFSET: i32 = -50;
/// Subtitle baseline offset from the vertical center.
pub const SUBTITLE_Y_OFFSET: i32 = 50;
/// Longest title drawn on a card, in characters.
pub const TITLE_MAX_CHARS: usize = 100;
/// Longest subtitle drawn on a card, in characters.
pub const SUBTITLE_MAX_CHARS: usize = 200;

/// Silent stereo WAV of `duration_secs`.
pub fn silent_audio(audio_out: &Path, duration_secs: f64) -> ToolCommand {
    ToolCommand::new(FFMPEG)
        .args(["-loglevel", "error", "-f", "lavfi", "-i"])
        .arg(format!("anullsrc=r={SILENT_SAMPLE_RATE}:cl=stereo"))
        .args(["-t", &format!("{duration_secs:.3}"), "-y"])
        .arg(audio_out)
}

/// One-frame still of the card background with title and subtitle drawn on top.
pub fn title_card(
    image_out: &Path,
    resolution: Resolution,
    title: &str,
    subtitle: &str,
    fonts: &FontSet,
) -> ToolCommand {
    let title = drawtext(
        &sanitize_drawtext(title, TITLE_MAX_CHARS),
        Rgb::WHITE,
        TITLE_FONT_SIZE,
        TITLE_Y_OFFSET,
        fonts.bold.as_deref(),
    );
    let subtitle = drawtext(
        &sanitize_drawtext(subtitle, SUBTITLE_MAX_CHARS),
        Rgb::LIGHT_GRAY,
        SUBTITLE_FONT_SIZE,
        SUBTITLE_Y_OFFSET,
        fonts.regular.as_deref(),
    );

    card_source(resolution)
        .arg("-vf")
        .arg(format!("{title},{subtitle}"))
        .args(["-frames:v", "1", "-y"])
        .arg(image_out)
}

/// One-frame still of the bare card background.
pub fn solid_card(image_out: &Path, resolution: Resolution) -> ToolCommand {
    card_source(resolution)
        .args(["-frames:v", "1", "-y"])
        .arg(image_out)
}

/// Mux the concat manifest's image sequence against `audio` into an H.264/AAC MP4.
///
/// `-shortest` trims the result to the shorter of the two streams.
pub fn concat_render(manifest: &Path, audio: &Path, video_out: &Path, fps: u32) -> ToolCommand {
    ToolCommand::new(FFMPEG)
        .args(["-loglevel", "error", "-f", "concat", "-safe", "0", "-i"])
        .arg(manifest)
        .arg("-i")
        .arg(audio)
        .args([
            "-c:v",
            "libx264",
            "-preset",
            "medium",
            "-crf",
            "23",
            "-pix_fmt",
            "yuv420p",
            "-r",
            &fps.to_string(),
            "-c:a",
            "aac",
            "-b:a",
            "192k",
            "-shortest",
            "-y",
        ])
        .arg(video_out)
}

fn card_source(resolution: Resolution) -> ToolCommand {
    ToolCommand::new(FFMPEG)
        .args(["-loglevel", "error", "-f", "lavfi", "-i"])
        .arg(format!(
            "color=c={}:s={resolution}:d=1",
            Rgb::CARD_BACKGROUND.to_ffmpeg()
        ))
}

fn drawtext(text: &str, color: Rgb, size: u32, y_offset: i32, font: Option<&Path>) -> String {
    let mut filter = format!(
        "drawtext=text='{text}':fontcolor={}:fontsize={size}:x=(w-text_w)/2:y=(h-text_h)/2{y_offset:+}",
        color.to_ffmpeg()
    );
    if let Some(font) = font {
        filter.push_str(":fontfile=");
        filter.push_str(&escape_font_path(&font.to_string_lossy()));
    }
    filter
}

// `\`, `:` and `'` are special inside a filter option value.
fn escape_font_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 8);
    for c in path.chars() {
        if matches!(c, '\\' | ':' | '\'') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Prepare text for a `drawtext` filter argument.
///
/// Cuts to `max_chars`, folds whitespace runs (newlines included) into single spaces, then
/// escapes `:` and `'`.
pub fn sanitize_drawtext(text: &str, max_chars: usize) -> String {
    let folded = truncate_chars(text, max_chars)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = String::with_capacity(folded.len() + 8);
    for c in folded.chars() {
        if matches!(c, ':' | '\'') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/tools/ffmpeg.rs"]
mod tests;
