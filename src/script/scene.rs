use crate::foundation::error::{ReelError, ReelResult};

/// One titled, timed unit of narration plus the still image shown for it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    /// 0-based position in the script; also the image sequence position.
    pub index: usize,
    /// Heading text, timecode annotation included.
    pub title: String,
    /// Narration with visual directives and bold annotations stripped.
    pub content: String,
    /// Explicit `start-end` range from the heading, when present.
    pub timecode: Option<String>,
    /// Time the scene's image stays on screen.
    pub duration_secs: f64,
    /// Visual directives joined with `" | "`; empty when there are none.
    pub visual_notes: String,
}

impl Scene {
    /// `true` when the scene contributes words to the narration track.
    pub fn has_narration(&self) -> bool {
        !self.content.trim().is_empty()
    }
}

/// Sum of scene durations, i.e. the expected length of the finished video.
pub fn total_duration_secs(scenes: &[Scene]) -> f64 {
    scenes.iter().map(|s| s.duration_secs).sum()
}

/// Parameters used to estimate the length of scenes without an explicit timecode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneTiming {
    /// Assumed speaking rate in words per minute.
    pub speaking_rate_wpm: f64,
    /// Lower bound for estimated scene durations (and for clamped timecodes).
    pub min_scene_duration_secs: f64,
}

impl Default for SceneTiming {
    fn default() -> Self {
        Self {
            speaking_rate_wpm: 150.0,
            min_scene_duration_secs: 3.0,
        }
    }
}

impl SceneTiming {
    /// Duration for `word_count` words at the configured rate, floored at the minimum.
    pub fn estimate_secs(&self, word_count: usize) -> f64 {
        let spoken = word_count as f64 / self.speaking_rate_wpm * 60.0;
        spoken.max(self.min_scene_duration_secs)
    }

    pub(crate) fn validate(&self) -> ReelResult<()> {
        if !(self.speaking_rate_wpm.is_finite() && self.speaking_rate_wpm > 0.0) {
            return Err(ReelError::validation("speaking rate must be positive"));
        }
        if !(self.min_scene_duration_secs.is_finite() && self.min_scene_duration_secs > 0.0) {
            return Err(ReelError::validation(
                "minimum scene duration must be positive",
            ));
        }
        Ok(())
    }
}
