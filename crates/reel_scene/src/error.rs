//! Scene error types

use thiserror::Error;

/// Scene and asset lookup errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// No asset registered under this name
    #[error("Unknown asset: {0}")]
    UnknownAsset(String),

    /// Scene index past the end of the sequence
    #[error("Scene index {index} out of range (sequence has {len} scenes)")]
    SceneIndex { index: usize, len: usize },
}

/// Result type for scene operations
pub type Result<T> = std::result::Result<T, SceneError>;
