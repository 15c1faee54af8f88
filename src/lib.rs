//! scriptreel turns markdown narration scripts into narrated title-card videos.
//!
//! A script is split into scenes at `##`/`###` headings. Each scene becomes a title card
//! held for the scene's duration, narrated by the first available TTS engine (or silence),
//! and encoded to MP4 with the system `ffmpeg`:
//!
//! - Build a [`Config`] and check it with [`Config::validate`]
//! - Create a [`Producer`] over a [`CommandRunner`]
//! - [`Producer::run`] the batch, or [`Producer::process_script`] a single file
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Runtime configuration and its command-line/environment surface.
pub mod config;
/// Shared value types and errors.
pub mod foundation;
/// Per-script production pipeline.
pub mod pipeline;
/// Script discovery and scene parsing.
pub mod script;
/// External tool plumbing.
pub mod tools;

pub use crate::config::{Config, ConfigArgs};
pub use crate::foundation::core::{Resolution, Rgb};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::pipeline::job::{JobPaths, JobState, Stage, Staged, VideoJob};
pub use crate::pipeline::producer::{Producer, RunSummary};
pub use crate::pipeline::render::RenderedVideo;
pub use crate::script::parse::{parse_script, parse_script_file};
pub use crate::script::scan::scan_scripts;
pub use crate::script::scene::{Scene, SceneTiming};
pub use crate::tools::fonts::FontSet;
pub use crate::tools::runner::{
    CommandRunner, ScriptedRunner, SystemRunner, ToolCommand, ToolOutput,
};
