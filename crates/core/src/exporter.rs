//! Export orchestrator tying the template, rasterizer, sink and sync together.
//!
//! This module provides the high-level API: render the current poster, turn
//! it into a JPEG, save it locally and, when configured, hand it to the sync
//! collaborator. Rasterization or save failures are fatal; sync failures only
//! leave a warning behind.

use crate::compositor::{EncodedImage, Rasterizer};
use crate::config::ExportConfig;
use crate::error::Result;
use crate::save::{poster_filename, DirectorySink, PosterSink};
use crate::state::{AppState, GENERATION_FAILED_MESSAGE, SYNC_FAILED_MESSAGE};
use crate::sync::{SimulatedNotionSync, SyncCollaborator};
use crate::templates;
use crate::view::{LayoutBox, RenderedView};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// What happened to the optional sync step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Settings incomplete; nothing was attempted.
    Skipped,
    /// The collaborator reported success.
    Synced,
    /// The collaborator reported failure; the local file still exists.
    Failed,
}

/// Result of a successful export.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// Where the poster was saved.
    pub path: PathBuf,
    /// The encoded poster.
    pub image: EncodedImage,
    /// Sync step result.
    pub sync: SyncOutcome,
    /// Total export time.
    pub duration: Duration,
}

/// Runs poster exports.
pub struct Exporter {
    /// Rasterization pipeline.
    rasterizer: Rasterizer,
    /// Local destination.
    sink: Arc<dyn PosterSink>,
    /// External sync.
    sync: Arc<dyn SyncCollaborator>,
    /// Layout the preview is rendered at before rasterizing.
    preview_layout: LayoutBox,
}

impl Exporter {
    /// Create an exporter writing into `config.output_dir` with simulated sync.
    pub fn new(config: ExportConfig) -> Result<Self> {
        config.validate()?;

        info!(
            "Initializing exporter: output_dir={:?}, target={}x{}",
            config.output_dir, config.raster.target_width, config.raster.target_height
        );

        Ok(Self {
            rasterizer: Rasterizer::new(config.raster)?,
            sink: Arc::new(DirectorySink::new(config.output_dir)),
            sync: Arc::new(SimulatedNotionSync::new(config.sync)),
            preview_layout: templates::A4_PREVIEW,
        })
    }

    /// Assemble an exporter from explicit collaborators.
    pub fn from_parts(
        rasterizer: Rasterizer,
        sink: Arc<dyn PosterSink>,
        sync: Arc<dyn SyncCollaborator>,
    ) -> Self {
        Self {
            rasterizer,
            sink,
            sync,
            preview_layout: templates::A4_PREVIEW,
        }
    }

    /// Replace the sync collaborator.
    pub fn with_sync(mut self, sync: Arc<dyn SyncCollaborator>) -> Self {
        self.sync = sync;
        self
    }

    /// Render previews at `layout` instead of the unscaled A4 size.
    pub fn with_preview_layout(mut self, layout: LayoutBox) -> Self {
        self.preview_layout = layout;
        self
    }

    /// Render the current poster and export it.
    pub async fn export(&self, state: &mut AppState) -> Result<ExportOutcome> {
        state.begin_export()?;
        let view = templates::render(&state.poster, self.preview_layout);
        self.run(state, &view).await
    }

    /// Export an already rendered view of `state.poster`.
    pub async fn export_rendered(
        &self,
        state: &mut AppState,
        view: &RenderedView,
    ) -> Result<ExportOutcome> {
        state.begin_export()?;
        self.run(state, view).await
    }

    async fn run(&self, state: &mut AppState, view: &RenderedView) -> Result<ExportOutcome> {
        let start = Instant::now();
        debug!("Stage 1: rasterizing {} poster", state.poster.template);

        let image = match self.rasterizer.rasterize_view(view).await {
            Ok(image) => image,
            Err(e) => {
                error!("Export failed: {}", e);
                state.fail(GENERATION_FAILED_MESSAGE);
                return Err(e);
            }
        };

        debug!("Stage 2: saving locally");
        let filename = poster_filename(&state.poster.speaker_name);
        let path = match self.sink.save(&filename, &image) {
            Ok(path) => path,
            Err(e) => {
                error!("Export failed: {}", e);
                state.fail(GENERATION_FAILED_MESSAGE);
                return Err(e);
            }
        };

        let sync = if state.sync_settings.is_configured() {
            debug!("Stage 3: syncing");
            state.mark_syncing();
            let snapshot = state.poster.clone();
            if self.sync.submit(&snapshot, &state.sync_settings, &image).await {
                SyncOutcome::Synced
            } else {
                warn!("Sync failed; poster kept at {:?}", path);
                SyncOutcome::Failed
            }
        } else {
            debug!("Sync not configured, skipping");
            SyncOutcome::Skipped
        };

        let warning = (sync == SyncOutcome::Failed).then_some(SYNC_FAILED_MESSAGE);
        state.succeed(warning);

        info!(
            "Exported {:?} ({:?}) in {:?}",
            path,
            sync,
            start.elapsed()
        );

        Ok(ExportOutcome {
            path,
            image,
            sync,
            duration: start.elapsed(),
        })
    }
}
