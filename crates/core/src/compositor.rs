//! Raster compositor: vector container to JPEG.
//!
//! This module provides the last stage of the export pipeline:
//! - Pixel buffer acquisition at the exact target size
//! - Asynchronous SVG decoding (usvg) fed through a transient object URL
//! - Opaque background fill and drawing (resvg / tiny-skia)
//! - JPEG encoding at a fixed quality (image)

use crate::config::RasterConfig;
use crate::container::VectorContainer;
use crate::error::{PosterError, RasterStage, Result};
use crate::object_url::{InMemoryObjectUrls, ObjectUrlGuard, ObjectUrlStore};
use crate::snapshot::Snapshot;
use crate::view::RenderedView;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use rayon::prelude::*;
use resvg::tiny_skia::{Color, Pixmap, Transform};
use resvg::usvg::{self, fontdb};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// MIME type of the SVG handed to the decoder.
const SVG_MIME: &str = "image/svg+xml;charset=utf-8";

/// An encoded poster image.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    /// Encoded bytes.
    pub data: Vec<u8>,
    /// MIME type of `data`.
    pub mime: &'static str,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl EncodedImage {
    /// Render as a `data:` URI.
    pub fn to_data_uri(&self) -> String {
        let preamble = format!("data:{};base64,", self.mime);
        let mut uri = String::with_capacity(preamble.len() + self.data.len() * 4 / 3 + 4);
        uri.push_str(&preamble);
        base64::engine::general_purpose::STANDARD.encode_string(&self.data, &mut uri);
        uri
    }
}

/// Rasterizes rendered views into JPEG images.
pub struct Rasterizer {
    /// Raster configuration.
    config: RasterConfig,
    /// Fonts available to text rendering, loaded once.
    fontdb: Arc<fontdb::Database>,
    /// Registry for the transient container URLs.
    urls: Arc<dyn ObjectUrlStore>,
}

impl Rasterizer {
    /// Create a rasterizer with its own object URL registry.
    pub fn new(config: RasterConfig) -> Result<Self> {
        Self::with_url_store(config, Arc::new(InMemoryObjectUrls::new()))
    }

    /// Create a rasterizer that registers container URLs in `urls`.
    pub fn with_url_store(config: RasterConfig, urls: Arc<dyn ObjectUrlStore>) -> Result<Self> {
        config.validate()?;

        let mut db = fontdb::Database::new();
        if config.load_system_fonts {
            db.load_system_fonts();
        }

        info!(
            "Rasterizer initialized at {}x{} ({} DPI), {} font faces",
            config.target_width,
            config.target_height,
            config.dpi,
            db.len()
        );

        Ok(Self {
            config,
            fontdb: Arc::new(db),
            urls,
        })
    }

    /// Get the raster configuration.
    pub fn config(&self) -> &RasterConfig {
        &self.config
    }

    /// Snapshot a rendered view and wrap it in a container.
    pub fn container_for(&self, view: &RenderedView) -> Result<VectorContainer> {
        for href in remote_images(view) {
            warn!("Remote image {} is not fetched and will be left blank", href);
        }
        let snapshot = Snapshot::capture(view);
        VectorContainer::build(&snapshot, &self.config).map_err(|e| {
            log_failure(&e);
            e
        })
    }

    /// Run the full pipeline on a rendered view.
    pub async fn rasterize_view(&self, view: &RenderedView) -> Result<EncodedImage> {
        let container = self.container_for(view)?;
        self.rasterize(&container).await
    }

    /// Decode, composite and encode a vector container.
    pub async fn rasterize(&self, container: &VectorContainer) -> Result<EncodedImage> {
        let start = Instant::now();
        let result = self.rasterize_inner(container).await;
        match &result {
            Ok(image) => debug!(
                "Rasterized {}x{} poster ({} bytes) in {:?}",
                image.width,
                image.height,
                image.data.len(),
                start.elapsed()
            ),
            Err(e) => log_failure(e),
        }
        result
    }

    async fn rasterize_inner(&self, container: &VectorContainer) -> Result<EncodedImage> {
        let (width, height) = (container.width, container.height);

        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            PosterError::raster(
                RasterStage::Surface,
                format!("could not allocate a {}x{} pixel buffer", width, height),
            )
        })?;

        // Revoked on every exit path below when the guard drops.
        let url = ObjectUrlGuard::create(
            Arc::clone(&self.urls),
            container.svg.clone().into_bytes(),
            SVG_MIME,
        );
        let tree = self.decode(&url).await?;

        let background = self.config.background_color;
        let quality = self.config.jpeg_quality;
        let data = tokio::task::spawn_blocking(move || {
            composite_and_encode(&tree, pixmap, background, quality)
        })
        .await
        .map_err(|e| {
            PosterError::raster(RasterStage::Encode, format!("encoder task failed: {}", e))
        })??;

        Ok(EncodedImage {
            data,
            mime: "image/jpeg",
            width,
            height,
        })
    }

    /// Decode the SVG behind `url` off the async executor.
    async fn decode(&self, url: &ObjectUrlGuard) -> Result<usvg::Tree> {
        let blob = url.blob().ok_or_else(|| {
            PosterError::raster(
                RasterStage::Decode,
                format!("object URL {} is not live", url.url()),
            )
        })?;

        let fontdb = Arc::clone(&self.fontdb);
        let task = tokio::task::spawn_blocking(move || {
            let mut options = usvg::Options::default();
            options.fontdb = fontdb;
            usvg::Tree::from_data(&blob.bytes, &options).map_err(|e| e.to_string())
        });

        let timeout = self.config.decode_timeout;
        match tokio::time::timeout(timeout, task).await {
            Ok(Ok(Ok(tree))) => Ok(tree),
            Ok(Ok(Err(message))) => Err(PosterError::raster(RasterStage::Decode, message)),
            Ok(Err(join_error)) => Err(PosterError::raster(
                RasterStage::Decode,
                format!("decoder task failed: {}", join_error),
            )),
            Err(_) => Err(PosterError::raster(
                RasterStage::Decode,
                format!("decoding did not finish within {:?}", timeout),
            )),
        }
    }
}

/// `http(s)` image references; the decoder only resolves local paths and data URIs.
fn remote_images(view: &RenderedView) -> Vec<&str> {
    view.root
        .find_all("image")
        .into_iter()
        .filter_map(|image| image.get_attr("href"))
        .filter(|href| href.starts_with("http://") || href.starts_with("https://"))
        .collect()
}

fn log_failure(err: &PosterError) {
    match err.raster_stage() {
        Some(stage) => error!(%stage, "Rasterization failed: {}", err),
        None => error!("Rasterization failed: {}", err),
    }
}

/// Fill, draw and encode. Runs on a blocking thread.
fn composite_and_encode(
    tree: &usvg::Tree,
    mut pixmap: Pixmap,
    background: (u8, u8, u8),
    quality: u8,
) -> Result<Vec<u8>> {
    let (r, g, b) = background;
    pixmap.fill(Color::from_rgba8(r, g, b, 255));
    resvg::render(tree, Transform::identity(), &mut pixmap.as_mut());

    let rgb = opaque_rgb(&pixmap);
    encode_jpeg(&rgb, pixmap.width(), pixmap.height(), quality)
}

/// Drop the alpha channel of a pixmap with an opaque background.
///
/// Every pixel has alpha 255, so premultiplied and straight values agree.
fn opaque_rgb(pixmap: &Pixmap) -> Vec<u8> {
    let mut rgb = vec![0u8; pixmap.width() as usize * pixmap.height() as usize * 3];
    rgb.par_chunks_exact_mut(3)
        .zip(pixmap.data().par_chunks_exact(4))
        .for_each(|(dst, src)| dst.copy_from_slice(&src[..3]));
    rgb
}

/// Encode packed RGB8 pixels as JPEG.
fn encode_jpeg(rgb: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .encode(rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| PosterError::raster(RasterStage::Encode, e.to_string()))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PosterData;
    use crate::object_url::ObjectUrlStats;
    use crate::templates;
    use std::time::Duration;

    const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];

    fn small_config() -> RasterConfig {
        RasterConfig::with_size(120, 170).load_system_fonts(false)
    }

    fn rect_snapshot(width: f32, height: f32) -> Snapshot {
        Snapshot::from_markup(
            format!(
                "<svg width=\"{w}\" height=\"{h}\"><rect width=\"{w}\" height=\"{h}\" fill=\"#059669\"/></svg>",
                w = width,
                h = height
            ),
            width,
            height,
        )
    }

    #[test]
    fn test_encode_jpeg_small_image() {
        let rgb = vec![255u8, 0, 0].repeat(10 * 10);
        let jpeg = encode_jpeg(&rgb, 10, 10, 95).unwrap();
        assert_eq!(&jpeg[0..3], &JPEG_MAGIC);
    }

    #[test]
    fn test_opaque_rgb_drops_alpha() {
        let mut pixmap = Pixmap::new(2, 1).unwrap();
        pixmap.fill(Color::from_rgba8(10, 20, 30, 255));
        assert_eq!(opaque_rgb(&pixmap), vec![10, 20, 30, 10, 20, 30]);
    }

    #[test]
    fn test_data_uri() {
        let image = EncodedImage {
            data: vec![0xFF, 0xD8, 0xFF],
            mime: "image/jpeg",
            width: 1,
            height: 1,
        };
        assert_eq!(image.to_data_uri(), "data:image/jpeg;base64,/9j/");
    }

    #[test]
    fn test_rasterizer_rejects_invalid_config() {
        let mut config = small_config();
        config.target_width = 0;
        assert!(Rasterizer::new(config).is_err());
    }

    #[tokio::test]
    async fn test_rasterize_output_matches_target_size() {
        let rasterizer = Rasterizer::new(small_config()).unwrap();

        for source_width in [60.0, 397.0, 1600.0] {
            let snap = rect_snapshot(source_width, source_width * 1.414);
            let container = VectorContainer::build(&snap, rasterizer.config()).unwrap();
            let encoded = rasterizer.rasterize(&container).await.unwrap();

            assert_eq!(encoded.mime, "image/jpeg");
            assert_eq!(&encoded.data[0..3], &JPEG_MAGIC);
            let decoded = image::load_from_memory(&encoded.data).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (120, 170));
        }
    }

    #[tokio::test]
    async fn test_rasterize_fills_opaque_background() {
        let config = small_config().background_color((255, 255, 255));
        let rasterizer = Rasterizer::new(config).unwrap();

        // Content covers only the top-left corner of the frame.
        let snap = Snapshot::from_markup(
            "<svg width=\"100\" height=\"100\"><rect width=\"10\" height=\"10\" fill=\"#000\"/></svg>",
            100.0,
            100.0,
        );
        let container = VectorContainer::build(&snap, rasterizer.config()).unwrap();
        let encoded = rasterizer.rasterize(&container).await.unwrap();

        let decoded = image::load_from_memory(&encoded.data).unwrap().to_rgb8();
        let corner = decoded.get_pixel(119, 169);
        assert!(corner.0.iter().all(|&c| c > 240), "got {:?}", corner);
    }

    #[tokio::test]
    async fn test_decode_failure_is_rasterization_error_and_revokes() {
        let urls = Arc::new(InMemoryObjectUrls::new());
        let rasterizer = Rasterizer::with_url_store(small_config(), urls.clone()).unwrap();

        let snap = Snapshot::from_markup("<svg><g><unclosed", 100.0, 100.0);
        let container = VectorContainer::build(&snap, rasterizer.config()).unwrap();
        let err = rasterizer.rasterize(&container).await.unwrap_err();

        assert_eq!(err.raster_stage(), Some(RasterStage::Decode));
        assert_eq!(
            urls.stats(),
            ObjectUrlStats {
                created: 1,
                revoked: 1,
                live: 0
            }
        );
    }

    #[tokio::test]
    async fn test_surface_failure_is_distinct_from_decode_failure() {
        let urls = Arc::new(InMemoryObjectUrls::new());
        let config = RasterConfig::with_size(u32::MAX, u32::MAX).load_system_fonts(false);
        let rasterizer = Rasterizer::with_url_store(config, urls.clone()).unwrap();

        let container = VectorContainer::build(&rect_snapshot(100.0, 100.0), rasterizer.config())
            .unwrap();
        let err = rasterizer.rasterize(&container).await.unwrap_err();

        assert_eq!(err.raster_stage(), Some(RasterStage::Surface));
        assert_eq!(urls.stats().created, urls.stats().revoked);
    }

    #[tokio::test]
    async fn test_repeated_rasterization_balances_urls() {
        let urls = Arc::new(InMemoryObjectUrls::new());
        let rasterizer = Rasterizer::with_url_store(small_config(), urls.clone()).unwrap();
        let container =
            VectorContainer::build(&rect_snapshot(200.0, 280.0), rasterizer.config()).unwrap();

        for _ in 0..3 {
            rasterizer.rasterize(&container).await.unwrap();
        }

        assert_eq!(
            urls.stats(),
            ObjectUrlStats {
                created: 3,
                revoked: 3,
                live: 0
            }
        );
    }

    #[tokio::test]
    async fn test_decode_timeout_is_decode_error_and_revokes() {
        let urls = Arc::new(InMemoryObjectUrls::new());
        let config = small_config().decode_timeout(Duration::from_nanos(1));
        let rasterizer = Rasterizer::with_url_store(config, urls.clone()).unwrap();

        // Large enough that parsing outlasts the timer.
        let markup = format!(
            "<svg width=\"100\" height=\"100\">{}</svg>",
            "<rect x=\"1\" y=\"1\" width=\"1\" height=\"1\" fill=\"#000\"/>".repeat(200_000)
        );
        let snap = Snapshot::from_markup(markup, 100.0, 100.0);
        let container = VectorContainer::build(&snap, rasterizer.config()).unwrap();
        let err = rasterizer.rasterize(&container).await.unwrap_err();

        assert_eq!(err.raster_stage(), Some(RasterStage::Decode));
        assert!(err.to_string().contains("did not finish"), "{}", err);
        assert_eq!(
            urls.stats(),
            ObjectUrlStats {
                created: 1,
                revoked: 1,
                live: 0
            }
        );
    }

    #[test]
    fn test_remote_images_lists_http_photos_only() {
        let mut data = PosterData::default();
        let view = templates::render_preview(&data);
        assert_eq!(remote_images(&view), vec!["https://picsum.photos/400/400"]);

        data.speaker_photo = "photos/jane.jpg".to_string();
        assert!(remote_images(&templates::render_preview(&data)).is_empty());
    }
}
