use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{ReelError, ReelResult};

/// Output video dimensions in pixels, written as `WIDTHxHEIGHT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Resolution {
    /// Create a validated resolution.
    ///
    /// Both dimensions must be non-zero and even (yuv420p output).
    pub fn new(width: u32, height: u32) -> ReelResult<Self> {
        let res = Self { width, height };
        res.validate()?;
        Ok(res)
    }

    /// Check the invariants of [`Resolution::new`] on an existing value.
    pub fn validate(self) -> ReelResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ReelError::validation(
                "resolution width/height must be non-zero",
            ));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(ReelError::validation(
                "resolution width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(())
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| ReelError::validation(format!("resolution '{s}' is not WIDTHxHEIGHT")))?;
        let width = w
            .trim()
            .parse::<u32>()
            .map_err(|e| ReelError::validation(format!("invalid resolution width '{w}': {e}")))?;
        let height = h
            .trim()
            .parse::<u32>()
            .map_err(|e| ReelError::validation(format!("invalid resolution height '{h}': {e}")))?;
        Self::new(width, height)
    }
}

/// Opaque 8-bit RGB color, rendered for ffmpeg as `0xRRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Slate background used behind every title card.
    pub const CARD_BACKGROUND: Rgb = Rgb(0x1e, 0x29, 0x3b);
    /// Title text color.
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
    /// Subtitle text color.
    pub const LIGHT_GRAY: Rgb = Rgb(0xcc, 0xcc, 0xcc);

    /// Format as an ffmpeg color literal.
    pub fn to_ffmpeg(self) -> String {
        format!("0x{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Longest prefix of `s` with at most `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
