/// Convenience result type used across scriptreel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by the pipeline.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid configuration or pipeline input.
    #[error("validation error: {0}")]
    Validation(String),

    /// A narration script could not be read or decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// An external tool could not be spawned or exited unsuccessfully.
    #[error("{program} failed: {detail}")]
    Tool {
        /// Program name as invoked.
        program: String,
        /// Exit status and trimmed stderr, or the spawn error.
        detail: String,
    },

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`ReelError::Tool`] value.
    pub fn tool(program: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Tool {
            program: program.into(),
            detail: detail.into(),
        }
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
