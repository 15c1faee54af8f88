//! External tool plumbing: the process runner abstraction and typed command builders.

/// `ffmpeg` command builders.
pub mod ffmpeg;
/// Title card font discovery.
pub mod fonts;
/// `ffprobe` command builder and output parsing.
pub mod probe;
/// Process runner trait and implementations.
pub mod runner;
/// Text-to-speech command builders.
pub mod tts;
