//! Startup errors
//!
//! The simulation itself cannot fail. Everything here happens before the
//! first frame and is fatal to the binary.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Failed to read settings from {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    InvalidConfig(String),

    #[error("Audio unavailable")]
    AudioUnavailable,

    #[error("Renderer initialization failed: {0}")]
    Renderer(String),
}
