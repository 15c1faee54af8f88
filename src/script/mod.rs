//! Narration scripts: discovery on disk and parsing into timed scenes.

/// Markdown script parsing.
pub mod parse;
/// Script discovery.
pub mod scan;
/// Scene model and timing estimation.
pub mod scene;
