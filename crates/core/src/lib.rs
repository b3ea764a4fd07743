//! # poster-gen-core
//!
//! Event poster generation with a vector-to-raster export pipeline.
//!
//! A poster is described by [`PosterData`] and drawn by one of three
//! [`Template`]s into a [`RenderedView`]. Exporting runs the view through:
//!
//! - **Snapshot**: serialize the view with its measured pixel size
//! - **Container**: wrap it in an SVG scaled onto A4 at 300 DPI
//! - **Compositor**: decode with usvg, draw over an opaque background with
//!   resvg, encode to JPEG
//!
//! The JPEG is then saved as `poster-<speaker-slug>.jpg` and, when both sync
//! settings are set, handed to a [`SyncCollaborator`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use poster_gen_core::{AppState, ExportConfig, Exporter, PosterEdit, Template};
//!
//! #[tokio::main]
//! async fn main() -> poster_gen_core::Result<()> {
//!     let exporter = Exporter::new(ExportConfig::new("./posters"))?;
//!
//!     let mut state = AppState::default();
//!     state.edit(PosterEdit::SetTemplate(Template::Corporate))?;
//!
//!     let outcome = exporter.export(&mut state).await?;
//!     println!("Saved {:?} ({:?})", outcome.path, outcome.sync);
//!     Ok(())
//! }
//! ```
//!
//! ## Rasterizing a view directly
//!
//! ```rust,no_run
//! use poster_gen_core::{templates, PosterData, RasterConfig, Rasterizer};
//!
//! #[tokio::main]
//! async fn main() -> poster_gen_core::Result<()> {
//!     let rasterizer = Rasterizer::new(RasterConfig::a4(150))?;
//!     let view = templates::render_preview(&PosterData::default());
//!     let jpeg = rasterizer.rasterize_view(&view).await?;
//!     println!("{}x{}, {} bytes", jpeg.width, jpeg.height, jpeg.data.len());
//!     Ok(())
//! }
//! ```

pub mod compositor;
pub mod config;
pub mod container;
pub mod error;
pub mod exporter;
pub mod model;
pub mod object_url;
pub mod save;
pub mod snapshot;
pub mod state;
pub mod sync;
pub mod templates;
pub mod view;

// Re-export main types for convenience
pub use compositor::{EncodedImage, Rasterizer};
pub use config::{ExportConfig, RasterConfig, SyncConfig};
pub use container::{scale_factor, VectorContainer};
pub use error::{PosterError, RasterStage, Result};
pub use exporter::{ExportOutcome, Exporter, SyncOutcome};
pub use model::{
    ExportStatus, ExternalSyncSettings, PosterData, PosterEdit, PosterField, Template,
    ThemePreset, THEME_PRESETS,
};
pub use object_url::{InMemoryObjectUrls, ObjectUrlStats, ObjectUrlStore};
pub use save::{poster_filename, speaker_slug, DirectorySink, PosterSink};
pub use snapshot::Snapshot;
pub use state::{AppState, Notice, NoticeKind};
pub use sync::{SimulatedNotionSync, SyncCollaborator, UnreachableSync};
pub use view::{Element, LayoutBox, RenderedView, ViewNode};

/// Initialize the library's logging.
/// Call this once at application startup if you want to see logs.
pub fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();
}
