//! Shared value types and the crate error taxonomy.

/// Resolution, colors and small text helpers.
pub mod core;
/// `ReelError` and `ReelResult`.
pub mod error;
