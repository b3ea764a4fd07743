//! Configuration types for poster rasterization and export.

use crate::error::{PosterError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// A4 width in millimetres.
const A4_WIDTH_MM: f64 = 210.0;
/// A4 height in millimetres.
const A4_HEIGHT_MM: f64 = 297.0;
const MM_PER_INCH: f64 = 25.4;

/// Configuration for turning a rendered view into a JPEG.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterConfig {
    /// Output width in pixels.
    /// Default: 2480 (A4 at 300 DPI).
    pub target_width: u32,

    /// Output height in pixels.
    /// Default: 3508 (A4 at 300 DPI).
    pub target_height: u32,

    /// Nominal DPI of the output, recorded for reporting.
    /// Default: 300.
    pub dpi: u32,

    /// JPEG quality (1-100).
    /// Default: 95.
    pub jpeg_quality: u8,

    /// Opaque fill drawn under the poster (JPEG has no alpha).
    /// Default: white (255, 255, 255).
    pub background_color: (u8, u8, u8),

    /// Base font size of the source view in pixels, scaled with the content.
    /// Default: 16.
    pub base_font_size: f32,

    /// Upper bound on waiting for the vector container to decode.
    /// This bounds the wait, not the work: a decode that overruns keeps its
    /// blocking thread until it finishes, and its result is discarded.
    /// Default: 30 seconds.
    pub decode_timeout: Duration,

    /// Whether to load system fonts for text rendering.
    /// Default: true.
    pub load_system_fonts: bool,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            target_width: 2480,
            target_height: 3508,
            dpi: 300,
            jpeg_quality: 95,
            background_color: (255, 255, 255),
            base_font_size: 16.0,
            decode_timeout: Duration::from_secs(30),
            load_system_fonts: true,
        }
    }
}

impl RasterConfig {
    /// Create a config targeting an A4 sheet at the given DPI.
    pub fn a4(dpi: u32) -> Self {
        let inches_w = A4_WIDTH_MM / MM_PER_INCH;
        let inches_h = A4_HEIGHT_MM / MM_PER_INCH;
        Self {
            target_width: (inches_w * dpi as f64).round() as u32,
            target_height: (inches_h * dpi as f64).round() as u32,
            dpi,
            ..Default::default()
        }
    }

    /// Create a config with an explicit output size.
    pub fn with_size(target_width: u32, target_height: u32) -> Self {
        Self {
            target_width,
            target_height,
            ..Default::default()
        }
    }

    /// Set JPEG quality, clamped to 1-100.
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Set the background fill.
    pub fn background_color(mut self, rgb: (u8, u8, u8)) -> Self {
        self.background_color = rgb;
        self
    }

    /// Set the decode timeout.
    pub fn decode_timeout(mut self, timeout: Duration) -> Self {
        self.decode_timeout = timeout;
        self
    }

    /// Enable or disable system font loading.
    pub fn load_system_fonts(mut self, enabled: bool) -> Self {
        self.load_system_fonts = enabled;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.target_width == 0 || self.target_height == 0 {
            return Err(PosterError::InvalidConfig(
                "target dimensions must be greater than 0".to_string(),
            ));
        }
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(PosterError::InvalidConfig(
                "jpeg_quality must be between 1 and 100".to_string(),
            ));
        }
        if !(self.base_font_size.is_finite() && self.base_font_size > 0.0) {
            return Err(PosterError::InvalidConfig(
                "base_font_size must be a positive number".to_string(),
            ));
        }
        if self.decode_timeout.is_zero() {
            return Err(PosterError::InvalidConfig(
                "decode_timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration for the simulated sync collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Simulated round-trip time.
    /// Default: 1500 ms.
    pub simulated_latency: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            simulated_latency: Duration::from_millis(1500),
        }
    }
}

impl SyncConfig {
    /// Create a sync config with the given simulated latency.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            simulated_latency: latency,
        }
    }
}

/// Combined configuration for the exporter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory receiving `poster-<slug>.jpg` files.
    /// Default: current directory.
    pub output_dir: PathBuf,

    /// Raster configuration.
    pub raster: RasterConfig,

    /// Sync configuration.
    pub sync: SyncConfig,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            raster: RasterConfig::default(),
            sync: SyncConfig::default(),
        }
    }
}

impl ExportConfig {
    /// Create an export config writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Replace the raster configuration.
    pub fn raster(mut self, raster: RasterConfig) -> Self {
        self.raster = raster;
        self
    }

    /// Replace the sync configuration.
    pub fn sync(mut self, sync: SyncConfig) -> Self {
        self.sync = sync;
        self
    }

    /// Validate the entire configuration.
    pub fn validate(&self) -> Result<()> {
        self.raster.validate()
    }
}
