//! Per-script production pipeline.
//!
//! Each stage returns a [`job::Staged`] value that carries its fallback events; the
//! [`producer::Producer`] threads those results through [`job::VideoJob::advance`].

/// Job model: output layout, stage state machine and fallback accounting.
pub mod job;
/// Narration text and audio track synthesis.
pub mod narration;
/// Batch driver over discovered scripts.
pub mod producer;
/// Concat manifest assembly and the final encode.
pub mod render;
/// Human-readable render log.
pub mod report;
/// Title card generation.
pub mod visuals;
