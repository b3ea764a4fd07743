//! Local saving of exported posters.

use crate::compositor::EncodedImage;
use crate::error::{PosterError, Result};
use std::path::PathBuf;
use tracing::info;

/// Slug used in poster filenames.
///
/// Lowercases the name and replaces each run of whitespace with a single
/// hyphen; every other character, punctuation included, is kept.
pub fn speaker_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
        } else {
            slug.extend(c.to_lowercase());
            in_space = false;
        }
    }
    slug
}

/// `poster-<slug>.jpg`
pub fn poster_filename(speaker_name: &str) -> String {
    format!("poster-{}.jpg", speaker_slug(speaker_name))
}

/// Destination for exported posters.
pub trait PosterSink: Send + Sync {
    /// Persist `image` under `filename`, returning where it went.
    fn save(&self, filename: &str, image: &EncodedImage) -> Result<PathBuf>;
}

/// Writes posters into a directory, creating it on demand.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl PosterSink for DirectorySink {
    fn save(&self, filename: &str, image: &EncodedImage) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(|e| PosterError::Save {
            path: self.dir.clone(),
            message: e.to_string(),
        })?;

        let path = self.dir.join(filename);
        std::fs::write(&path, &image.data).map_err(|e| PosterError::Save {
            path: path.clone(),
            message: e.to_string(),
        })?;

        info!("Saved {}x{} poster to {:?}", image.width, image.height, path);
        Ok(path)
    }
}
