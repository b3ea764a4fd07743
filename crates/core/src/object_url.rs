//! Transient `blob:` URLs used to hand a container to the decoder.
//!
//! A URL lives exactly as long as one rasterization call. The
//! [`ObjectUrlGuard`] revokes it when dropped, so success, failure and
//! timeout paths all release it once.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};
use uuid::Uuid;

/// An in-memory payload registered under a URL.
#[derive(Debug, Clone)]
pub struct Blob {
    pub mime: String,
    pub bytes: Arc<[u8]>,
}

/// Registry of object URLs.
pub trait ObjectUrlStore: Send + Sync {
    /// Register `bytes` and return a fresh URL for them.
    fn create(&self, bytes: Vec<u8>, mime: &str) -> String;

    /// Look up a live URL.
    fn resolve(&self, url: &str) -> Option<Blob>;

    /// Release a URL. Returns `false` if it was not live.
    fn revoke(&self, url: &str) -> bool;
}

/// Counts of URLs handed out and released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObjectUrlStats {
    pub created: usize,
    pub revoked: usize,
    pub live: usize,
}

/// Process-local object URL registry.
#[derive(Debug, Default)]
pub struct InMemoryObjectUrls {
    blobs: Mutex<HashMap<String, Blob>>,
    created: AtomicUsize,
    revoked: AtomicUsize,
}

impl InMemoryObjectUrls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> ObjectUrlStats {
        let live = self.blobs.lock().unwrap_or_else(|p| p.into_inner()).len();
        ObjectUrlStats {
            created: self.created.load(Ordering::SeqCst),
            revoked: self.revoked.load(Ordering::SeqCst),
            live,
        }
    }
}

impl ObjectUrlStore for InMemoryObjectUrls {
    fn create(&self, bytes: Vec<u8>, mime: &str) -> String {
        let url = format!("blob:poster-gen/{}", Uuid::new_v4());
        let blob = Blob {
            mime: mime.to_string(),
            bytes: bytes.into(),
        };
        self.blobs
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(url.clone(), blob);
        self.created.fetch_add(1, Ordering::SeqCst);
        debug!("Created object URL {}", url);
        url
    }

    fn resolve(&self, url: &str) -> Option<Blob> {
        let blobs = self.blobs.lock().unwrap_or_else(|p| p.into_inner());
        blobs.get(url).cloned()
    }

    fn revoke(&self, url: &str) -> bool {
        let mut blobs = self.blobs.lock().unwrap_or_else(|p| p.into_inner());
        if blobs.remove(url).is_some() {
            self.revoked.fetch_add(1, Ordering::SeqCst);
            debug!("Revoked object URL {}", url);
            true
        } else {
            warn!("Attempted to revoke unknown object URL {}", url);
            false
        }
    }
}

/// Owns a URL for the duration of a scope and revokes it on drop.
pub struct ObjectUrlGuard {
    store: Arc<dyn ObjectUrlStore>,
    url: String,
}

impl ObjectUrlGuard {
    /// Register `bytes` in `store` and guard the resulting URL.
    pub fn create(store: Arc<dyn ObjectUrlStore>, bytes: Vec<u8>, mime: &str) -> Self {
        let url = store.create(bytes, mime);
        Self { store, url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Resolve the guarded URL.
    pub fn blob(&self) -> Option<Blob> {
        self.store.resolve(&self.url)
    }
}

impl Drop for ObjectUrlGuard {
    fn drop(&mut self) {
        self.store.revoke(&self.url);
    }
}
