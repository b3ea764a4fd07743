//! External sync collaborator.
//!
//! The exporter only sees [`SyncCollaborator`]; [`SimulatedNotionSync`] logs
//! the database record it would create and fakes the round-trip. A real
//! client needs a server-side proxy: the service will not take the image
//! inline, and the token cannot stay secret in a client-only deployment.

use crate::compositor::EncodedImage;
use crate::config::SyncConfig;
use crate::model::{ExternalSyncSettings, PosterData};
use futures::future::{BoxFuture, FutureExt};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};

/// Pushes poster metadata to an external service.
pub trait SyncCollaborator: Send + Sync {
    /// Submit a poster; resolves to `true` on success.
    ///
    /// Implementations must resolve to `false` immediately, without I/O,
    /// when either settings field is empty.
    fn submit<'a>(
        &'a self,
        data: &'a PosterData,
        settings: &'a ExternalSyncSettings,
        image: &'a EncodedImage,
    ) -> BoxFuture<'a, bool>;
}

/// Build the database record for a poster.
pub fn notion_record(data: &PosterData, settings: &ExternalSyncSettings) -> Value {
    json!({
        "parent": { "database_id": settings.database_id },
        "properties": {
            "Title": { "title": [{ "text": { "content": data.title } }] },
            "Speaker": { "rich_text": [{ "text": { "content": data.speaker_name } }] },
            "Date": { "date": { "start": data.event_date } },
            "Location": { "select": { "name": data.location } },
        }
    })
}

/// Simulated note-taking service sync.
#[derive(Debug, Default)]
pub struct SimulatedNotionSync {
    config: SyncConfig,
    attempts: AtomicUsize,
}

impl SimulatedNotionSync {
    pub fn new(config: SyncConfig) -> Self {
        Self {
            config,
            attempts: AtomicUsize::new(0),
        }
    }

    /// Number of simulated round-trips started.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl SyncCollaborator for SimulatedNotionSync {
    fn submit<'a>(
        &'a self,
        data: &'a PosterData,
        settings: &'a ExternalSyncSettings,
        image: &'a EncodedImage,
    ) -> BoxFuture<'a, bool> {
        async move {
            if !settings.is_configured() {
                debug!("Sync settings incomplete, not contacting the service");
                return false;
            }

            self.attempts.fetch_add(1, Ordering::SeqCst);
            let record = notion_record(data, settings);
            info!(
                "Syncing poster to database {}: {} ({} byte {} attached out of band)",
                settings.database_id,
                record,
                image.data.len(),
                image.mime
            );

            tokio::time::sleep(self.config.simulated_latency).await;

            info!("Poster pushed to database {}", settings.database_id);
            true
        }
        .boxed()
    }
}

/// Sync collaborator that always reports failure after the round-trip.
///
/// Useful to exercise the downgraded-warning path from the CLI.
#[derive(Debug, Default)]
pub struct UnreachableSync;

impl SyncCollaborator for UnreachableSync {
    fn submit<'a>(
        &'a self,
        _data: &'a PosterData,
        settings: &'a ExternalSyncSettings,
        _image: &'a EncodedImage,
    ) -> BoxFuture<'a, bool> {
        async move {
            if settings.is_configured() {
                warn!("Sync service unreachable");
            }
            false
        }
        .boxed()
    }
}
