//! Error types for poster generation and export.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Stage of the rasterization pipeline that failed.
///
/// Callers only see [`PosterError::Rasterization`]; the stage is carried
/// along for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RasterStage {
    /// Building the scaled vector container (e.g. zero source width).
    Container,
    /// Acquiring the target pixel buffer.
    Surface,
    /// Decoding the vector container into a render tree.
    Decode,
    /// Encoding the pixel buffer to JPEG.
    Encode,
}

impl fmt::Display for RasterStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RasterStage::Container => "container",
            RasterStage::Surface => "surface",
            RasterStage::Decode => "decode",
            RasterStage::Encode => "encode",
        };
        f.write_str(name)
    }
}

/// Main error type for the poster-gen library.
#[derive(Error, Debug)]
pub enum PosterError {
    /// The rendered view could not be turned into an image.
    #[error("Rasterization failed at {stage} stage: {message}")]
    Rasterization { stage: RasterStage, message: String },

    /// The encoded poster could not be written locally.
    #[error("Failed to save poster to '{path}': {message}")]
    Save { path: PathBuf, message: String },

    /// A form edit was rejected.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An export is already running.
    #[error("An export is already in progress")]
    ExportInProgress,

    /// I/O error while loading inputs.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON input.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl PosterError {
    pub(crate) fn raster(stage: RasterStage, message: impl Into<String>) -> Self {
        PosterError::Rasterization {
            stage,
            message: message.into(),
        }
    }

    /// The failing pipeline stage, if this is a rasterization failure.
    pub fn raster_stage(&self) -> Option<RasterStage> {
        match self {
            PosterError::Rasterization { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Result type alias for convenience.
pub type Result<T> = std::result::Result<T, PosterError>;
