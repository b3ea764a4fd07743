//! Scalable vector container around a snapshot.
//!
//! The container declares the fixed output frame (A4 at 300 DPI by default)
//! and scales the snapshot uniformly so that its measured width fills the
//! frame, whatever size the view was laid out at.

use crate::config::RasterConfig;
use crate::error::{PosterError, RasterStage, Result};
use crate::snapshot::Snapshot;
use tracing::{debug, warn};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// SVG document ready to be decoded by the compositor.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorContainer {
    /// Complete SVG document.
    pub svg: String,
    /// Declared output width in pixels.
    pub width: u32,
    /// Declared output height in pixels.
    pub height: u32,
    /// Uniform scale applied to the snapshot.
    pub scale: f64,
    /// Base font size in output pixels.
    pub base_font_size: f64,
}

impl VectorContainer {
    /// Wrap `snapshot` in a container sized by `config`.
    pub fn build(snapshot: &Snapshot, config: &RasterConfig) -> Result<Self> {
        let scale = scale_factor(config.target_width, snapshot.width)?;
        let base_font_size = config.base_font_size as f64 * scale;

        let mut svg = String::with_capacity(snapshot.markup.len() + 256);
        svg.push_str(&format!(
            "<svg xmlns=\"{ns}\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-size=\"{fs}\">",
            ns = SVG_NS,
            w = config.target_width,
            h = config.target_height,
            fs = base_font_size,
        ));
        svg.push_str(&format!("<g transform=\"scale({})\">", scale));
        svg.push_str(&snapshot.markup);
        svg.push_str("</g></svg>");

        debug!(
            "Built {}x{} container, scale={:.4}, base font={:.2}px",
            config.target_width, config.target_height, scale, base_font_size
        );

        Ok(Self {
            svg,
            width: config.target_width,
            height: config.target_height,
            scale,
            base_font_size,
        })
    }
}

/// Scale mapping a source of `source_width` pixels onto `target_width`.
///
/// Fails for a zero, negative or non-finite source width (an element that
/// is hidden or has not been laid out yet).
pub fn scale_factor(target_width: u32, source_width: f32) -> Result<f64> {
    if !source_width.is_finite() || source_width <= 0.0 {
        warn!("Refusing to scale source of width {}", source_width);
        return Err(PosterError::raster(
            RasterStage::Container,
            format!("source element has no measurable width ({})", source_width),
        ));
    }
    Ok(target_width as f64 / source_width as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_factor_is_target_over_source() {
        assert_eq!(scale_factor(2480, 794.0).unwrap(), 2480.0 / 794.0);
        assert_eq!(scale_factor(2480, 2480.0).unwrap(), 1.0);
        assert_eq!(scale_factor(1000, 250.0).unwrap(), 4.0);
    }

    #[test]
    fn test_scale_factor_rejects_zero_width() {
        let err = scale_factor(2480, 0.0).unwrap_err();
        assert_eq!(err.raster_stage(), Some(RasterStage::Container));
    }

    #[test]
    fn test_scale_factor_rejects_non_finite_width() {
        assert!(scale_factor(2480, f32::NAN).is_err());
        assert!(scale_factor(2480, f32::INFINITY).is_err());
        assert!(scale_factor(2480, -3.0).is_err());
    }

    #[test]
    fn test_build_declares_target_frame() {
        let snap = Snapshot::from_markup("<svg width=\"397\" height=\"561\"/>", 397.0, 561.0);
        let container = VectorContainer::build(&snap, &RasterConfig::default()).unwrap();

        assert_eq!(container.width, 2480);
        assert_eq!(container.height, 3508);
        assert_eq!(container.scale, 2480.0 / 397.0);
        assert!(container.svg.contains("width=\"2480\" height=\"3508\""));
        assert!(container
            .svg
            .contains(&format!("transform=\"scale({})\"", container.scale)));
        assert!(container.svg.contains(&snap.markup));
    }

    #[test]
    fn test_build_scales_base_font() {
        let snap = Snapshot::from_markup("<svg/>", 620.0, 877.0);
        let container = VectorContainer::build(&snap, &RasterConfig::default()).unwrap();
        assert_eq!(container.scale, 4.0);
        assert_eq!(container.base_font_size, 64.0);
        assert!(container.svg.contains("font-size=\"64\""));
    }

    #[test]
    fn test_build_zero_width_is_rasterization_failure() {
        let snap = Snapshot::from_markup("<svg/>", 0.0, 100.0);
        let err = VectorContainer::build(&snap, &RasterConfig::default()).unwrap_err();
        assert!(matches!(err, PosterError::Rasterization { .. }));
    }
}
