//! Face error types

use thiserror::Error;

/// Errors reported to the host
#[derive(Error, Debug)]
pub enum FaceError {
    /// The off-screen trail buffer could not be allocated
    #[error("Failed to allocate {width}x{height} trail buffer")]
    TrailAllocation { width: u32, height: u32 },

    /// Preference payload was not valid JSON
    #[error("Invalid settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),
}

/// Result type for face operations
pub type Result<T> = std::result::Result<T, FaceError>;
