//! Explicit application state with export status transitions.

use crate::error::{PosterError, Result};
use crate::model::{ExportStatus, ExternalSyncSettings, PosterData, PosterEdit};
use tracing::debug;

/// User-facing message after a failed generation.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate poster image.";
/// User-facing warning when the image was saved but not synced.
pub const SYNC_FAILED_MESSAGE: &str = "Notion sync failed. The JPG was downloaded locally.";

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Export succeeded with a caveat.
    Warning,
    /// Export failed.
    Error,
}

/// A dismissible message shown next to the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// Form data, sync settings and export progress.
///
/// Status moves `Idle -> Generating [-> Syncing] -> Success` or
/// `-> Error`; [`AppState::reset`] returns a finished export to `Idle`.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub poster: PosterData,
    pub sync_settings: ExternalSyncSettings,
    status: ExportStatus,
    notice: Option<Notice>,
}

impl AppState {
    pub fn new(poster: PosterData, sync_settings: ExternalSyncSettings) -> Self {
        Self {
            poster,
            sync_settings,
            status: ExportStatus::Idle,
            notice: None,
        }
    }

    pub fn status(&self) -> ExportStatus {
        self.status
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Apply a form edit to the poster.
    pub fn edit(&mut self, edit: PosterEdit) -> Result<()> {
        self.poster.apply(edit)
    }

    /// Export is possible only from `Idle`.
    pub fn can_export(&self) -> bool {
        self.status == ExportStatus::Idle
    }

    /// `Idle -> Generating`. Clears any previous notice.
    pub fn begin_export(&mut self) -> Result<()> {
        if !self.can_export() {
            return Err(PosterError::ExportInProgress);
        }
        self.notice = None;
        self.transition(ExportStatus::Generating);
        Ok(())
    }

    /// `Generating -> Syncing`.
    pub fn mark_syncing(&mut self) {
        debug_assert_eq!(self.status, ExportStatus::Generating);
        self.transition(ExportStatus::Syncing);
    }

    /// Finish successfully, optionally with a warning.
    pub fn succeed(&mut self, warning: Option<&str>) {
        self.notice = warning.map(|text| Notice {
            kind: NoticeKind::Warning,
            text: text.to_string(),
        });
        self.transition(ExportStatus::Success);
    }

    /// Finish with a fatal error.
    pub fn fail(&mut self, message: &str) {
        self.notice = Some(Notice {
            kind: NoticeKind::Error,
            text: message.to_string(),
        });
        self.transition(ExportStatus::Error);
    }

    /// Return a finished export (`Success` or `Error`) to `Idle`.
    ///
    /// Busy states are left alone. The notice stays until dismissed.
    pub fn reset(&mut self) {
        if matches!(self.status, ExportStatus::Success | ExportStatus::Error) {
            self.transition(ExportStatus::Idle);
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn transition(&mut self, next: ExportStatus) {
        debug!("Export status {:?} -> {:?}", self.status, next);
        self.status = next;
    }
}
