use std::path::{Path, PathBuf};

/// Bold font candidates, most preferred first (Linux, macOS, Windows).
pub const BOLD_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Regular font candidates, most preferred first (Linux, macOS, Windows).
pub const REGULAR_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Font files used for title card text. `None` means "let the renderer pick".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontSet {
    /// Font for the title line.
    pub bold: Option<PathBuf>,
    /// Font for the subtitle line.
    pub regular: Option<PathBuf>,
}

impl FontSet {
    /// Probe the platform candidate lists.
    pub fn probe() -> Self {
        let fonts = Self::resolve(BOLD_FONT_CANDIDATES, REGULAR_FONT_CANDIDATES);
        tracing::debug!(bold = ?fonts.bold, regular = ?fonts.regular, "resolved title card fonts");
        fonts
    }

    /// Pick the first existing path from each list.
    pub fn resolve<P: AsRef<Path>>(bold: &[P], regular: &[P]) -> Self {
        Self {
            bold: first_existing(bold),
            regular: first_existing(regular),
        }
    }
}

fn first_existing<P: AsRef<Path>>(candidates: &[P]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|p| p.as_ref())
        .find(|p| p.is_file())
        .map(Path::to_path_buf)
}

#[cfg(test)]
#[path = "../../tests/unit/tools/fonts.rs"]
mod tests;
