//! Grid thumbnail loading
//!
//! Implements the adapter's `ImageLoader` on top of `image` decoding and
//! `ratatui-image` protocols. Decoding runs on the blocking pool; results
//! come back through a channel the main loop drains every frame. Decoded
//! thumbnails are kept in a bounded LRU cache per content uri, so a recycled
//! slot that is re-bound to a recently loaded item shows it immediately.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;

use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use tokio::sync::mpsc;

use mediamaster::adapter::{ImageLoader, SlotTarget};
use mediamaster::store::ContentStore;
use mediamaster::utils::log_debug;
use mediamaster::ContentUri;

/// Largest file the loader will decode
const MAX_THUMBNAIL_SOURCE_BYTES: u64 = 20 * 1024 * 1024;

/// Decoded images are shrunk to fit this box before encoding
const THUMBNAIL_BOUNDS: u32 = 256;

/// A few screens' worth of four-image rows
const THUMBNAIL_CACHE_ENTRIES: usize = 64;

pub enum ThumbnailState {
    /// Placeholder is shown
    Loading,
    Ready(StatefulProtocol),
    /// Fallback is shown
    Failed,
}

impl std::fmt::Debug for ThumbnailState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThumbnailState::Loading => write!(f, "ThumbnailState::Loading"),
            ThumbnailState::Ready(_) => write!(f, "ThumbnailState::Ready(<StatefulProtocol>)"),
            ThumbnailState::Failed => write!(f, "ThumbnailState::Failed"),
        }
    }
}

pub struct Thumbnails {
    store: Arc<dyn ContentStore>,
    picker: Option<Picker>,
    update_tx: mpsc::UnboundedSender<(ContentUri, ThumbnailState)>,
    update_rx: mpsc::UnboundedReceiver<(ContentUri, ThumbnailState)>,
    states: lru::LruCache<ContentUri, ThumbnailState>,
    /// What each bound grid slot currently shows
    slots: HashMap<SlotTarget, ContentUri>,
}

impl Thumbnails {
    pub fn new(store: Arc<dyn ContentStore>, picker: Option<Picker>) -> Self {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        Self {
            store,
            picker,
            update_tx,
            update_rx,
            states: lru::LruCache::new(
                NonZeroUsize::new(THUMBNAIL_CACHE_ENTRIES).unwrap_or(NonZeroUsize::MIN),
            ),
            slots: HashMap::new(),
        }
    }

    /// Apply finished loads; returns how many were applied
    ///
    /// Results for entries evicted (or reset) while in flight are dropped.
    pub fn drain_updates(&mut self) -> usize {
        let mut count = 0;
        while let Ok((uri, state)) = self.update_rx.try_recv() {
            match self.states.peek_mut(&uri) {
                Some(entry) => {
                    *entry = state;
                    count += 1;
                }
                None => log_debug(&format!("Thumbnail: dropping late result for {}", uri)),
            }
        }
        count
    }

    /// State of the image bound to a slot (`None` for an empty slot)
    pub fn slot_state(&mut self, target: SlotTarget) -> Option<&mut ThumbnailState> {
        let uri = self.slots.get(&target)?;
        self.states.get_mut(uri)
    }

    /// Drop every cached thumbnail and slot binding
    pub fn reset(&mut self) {
        self.states.clear();
        self.slots.clear();
    }

    fn spawn_load(&mut self, uri: &ContentUri, path: PathBuf, picker: Picker) {
        self.states.put(uri.clone(), ThumbnailState::Loading);

        let tx = self.update_tx.clone();
        let uri = uri.clone();
        tokio::spawn(async move {
            log_debug(&format!("Thumbnail: loading {} from {}", uri, path.display()));
            let state = match load_thumbnail(path, picker).await {
                Ok(protocol) => ThumbnailState::Ready(protocol),
                Err(e) => {
                    log_debug(&format!("Thumbnail: {} failed: {}", uri, e));
                    ThumbnailState::Failed
                }
            };
            let _ = tx.send((uri, state));
        });
    }
}

impl ImageLoader for Thumbnails {
    fn load(&mut self, uri: &ContentUri, target: SlotTarget) {
        self.slots.insert(target, uri.clone());

        // Cached, failed, or already in flight
        if self.states.get(uri).is_some() {
            return;
        }

        let Some(picker) = self.picker.clone() else {
            self.states.put(uri.clone(), ThumbnailState::Failed);
            return;
        };

        match self.store.resolve_path(uri) {
            Some(path) => self.spawn_load(uri, path, picker),
            None => {
                log_debug(&format!("Thumbnail: no file for {}", uri));
                self.states.put(uri.clone(), ThumbnailState::Failed);
            }
        }
    }

    fn clear(&mut self, target: SlotTarget) {
        self.slots.remove(&target);
    }
}

async fn load_thumbnail(path: PathBuf, picker: Picker) -> anyhow::Result<StatefulProtocol> {
    let size = tokio::fs::metadata(&path).await?.len();
    if size > MAX_THUMBNAIL_SOURCE_BYTES {
        anyhow::bail!("file too large ({} bytes)", size);
    }

    let protocol = tokio::task::spawn_blocking(move || -> anyhow::Result<StatefulProtocol> {
        let img = image::open(&path)?;
        let img = img.thumbnail(THUMBNAIL_BOUNDS, THUMBNAIL_BOUNDS);
        Ok(picker.new_resize_protocol(img))
    })
    .await??;

    Ok(protocol)
}
