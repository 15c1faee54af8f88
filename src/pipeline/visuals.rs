use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::core::{Resolution, truncate_chars};
use crate::foundation::error::ReelResult;
use crate::pipeline::job::{JobPaths, Staged};
use crate::script::scene::Scene;
use crate::tools::ffmpeg::{self, SUBTITLE_MAX_CHARS};
use crate::tools::fonts::FontSet;
use crate::tools::runner::{CommandRunner, run_checked};

/// Subtitle drawn under a scene title: the visual notes, or the start of the narration.
pub fn card_subtitle(scene: &Scene) -> &str {
    if scene.visual_notes.is_empty() {
        truncate_chars(&scene.content, SUBTITLE_MAX_CHARS)
    } else {
        &scene.visual_notes
    }
}

/// Render one title card per scene into `visuals/`.
///
/// Any image already at a card's path is removed first. A card whose text cannot be drawn is
/// replaced by a plain background card. If even that fails the path is still returned and
/// nothing exists there, so the renderer skips it.
#[tracing::instrument(skip_all, fields(stem = %paths.stem, scenes = scenes.len()))]
pub fn generate_visuals(
    scenes: &[Scene],
    paths: &JobPaths,
    resolution: Resolution,
    fonts: &FontSet,
    runner: &mut dyn CommandRunner,
) -> ReelResult<Staged<Vec<PathBuf>>> {
    let visuals_dir = paths.visuals_dir();
    std::fs::create_dir_all(&visuals_dir)
        .with_context(|| format!("create visuals dir '{}'", visuals_dir.display()))?;

    let mut images = Vec::with_capacity(scenes.len());
    let mut fallbacks = Vec::new();

    for scene in scenes {
        let image = paths.scene_image(scene.index);
        remove_stale(&image)?;
        let card = ffmpeg::title_card(&image, resolution, &scene.title, card_subtitle(scene), fonts);

        match run_checked(runner, &card) {
            Ok(_) => tracing::debug!(path = %image.display(), "created title card"),
            Err(e) => {
                tracing::warn!(
                    scene = scene.index,
                    error = %e,
                    "title card text failed, creating solid color card"
                );
                match run_checked(runner, &ffmpeg::solid_card(&image, resolution)) {
                    Ok(_) => fallbacks.push(format!(
                        "scene {}: plain card used, title text failed ({e})",
                        scene.index + 1
                    )),
                    Err(e) => {
                        tracing::warn!(scene = scene.index, error = %e, "solid color card failed");
                        fallbacks.push(format!("scene {}: no image generated ({e})", scene.index + 1));
                    }
                }
            }
        }

        images.push(image);
    }

    tracing::info!(count = images.len(), "generated visual assets");
    Ok(Staged::with_fallbacks(images, fallbacks))
}

// Clears the card path so only images written by this run exist there.
fn remove_stale(image: &Path) -> ReelResult<()> {
    match std::fs::remove_file(image) {
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        other => Ok(other
            .with_context(|| format!("remove stale scene image '{}'", image.display()))?),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/visuals.rs"]
mod tests;
