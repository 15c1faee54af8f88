use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::error::{ReelError, ReelResult};
use crate::script::scene::{Scene, SceneTiming};

// `##` or `###` at the start of a line. Deeper headings stay inside the body.
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n#{2,3}\s+").expect("heading regex"));

// `(0:00 - 0:30)` or `[0:00-0:30]`, hyphen or en-dash.
static TIMECODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\(\[](\d+):(\d+)\s*[-–]\s*(\d+):(\d+)[\)\]]").expect("timecode regex")
});

static VISUAL_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(?i:ON SCREEN:|Visual:)\s*([^\]]+)\]").expect("directive regex")
});

static BOLD_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*\[[^\]]+\]\*\*").expect("annotation regex"));

/// Read and parse a script file.
pub fn parse_script_file(path: &Path, timing: &SceneTiming) -> ReelResult<Vec<Scene>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| ReelError::parse(format!("failed to read '{}': {e}", path.display())))?;
    let scenes = parse_script(&text, timing);
    tracing::info!(
        script = %path.display(),
        scenes = scenes.len(),
        "parsed script"
    );
    Ok(scenes)
}

/// Split a markdown script into ordered scenes.
///
/// Every `##`/`###` heading opens a scene; text before the first heading is dropped. Scene
/// indices are assigned in document order starting at 0.
pub fn parse_script(text: &str, timing: &SceneTiming) -> Vec<Scene> {
    // A heading on the very first line has no preceding newline.
    let normalized = format!("\n{}", text.replace("\r\n", "\n"));

    HEADING
        .split(&normalized)
        .skip(1)
        .enumerate()
        .map(|(index, section)| parse_section(index, section, timing))
        .collect()
}

fn parse_section(index: usize, section: &str, timing: &SceneTiming) -> Scene {
    let section = section.trim();
    let (title, body) = section.split_once('\n').unwrap_or((section, ""));
    let title = title.trim();

    let (timecode, duration_secs) = match parse_timecode(title) {
        Some((timecode, secs)) => {
            let secs = if secs > 0.0 {
                secs
            } else {
                tracing::warn!(
                    scene = index,
                    timecode = %timecode,
                    "timecode ends at or before its start, using minimum duration"
                );
                timing.min_scene_duration_secs
            };
            (Some(timecode), secs)
        }
        None => (None, timing.estimate_secs(body.split_whitespace().count())),
    };

    let visual_notes = VISUAL_DIRECTIVE
        .captures_iter(body)
        .map(|c| c[1].trim_end().to_owned())
        .collect::<Vec<_>>()
        .join(" | ");

    let content = BOLD_ANNOTATION.replace_all(body, "");
    let content = VISUAL_DIRECTIVE.replace_all(&content, "");

    Scene {
        index,
        title: title.to_owned(),
        content: content.trim().to_owned(),
        timecode,
        duration_secs,
        visual_notes,
    }
}

/// Extract `start-end` and its length in seconds from a heading.
///
/// The length is raw arithmetic and may be zero or negative.
fn parse_timecode(title: &str) -> Option<(String, f64)> {
    let caps = TIMECODE.captures(title)?;
    let field = |i: usize| caps[i].parse::<u64>().ok();
    let start = field(1)?.checked_mul(60)?.checked_add(field(2)?)?;
    let end = field(3)?.checked_mul(60)?.checked_add(field(4)?)?;
    let timecode = format!("{}:{}-{}:{}", &caps[1], &caps[2], &caps[3], &caps[4]);
    Some((timecode, end as f64 - start as f64))
}

#[cfg(test)]
#[path = "../../tests/unit/script/parse.rs"]
mod tests;
