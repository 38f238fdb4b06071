//! Persisted favorites.
//!
//! Favorites are item snapshots keyed by `(id, kind)`. The whole list is
//! re-serialized on every change; missing or malformed data loads as empty.

use crate::models::media::{MediaItem, MediaKind};
use crate::utils::fs;
use crate::Result;
use std::path::{Path, PathBuf};

/// File name of the persisted favorites list inside the data directory.
pub const FAVORITES_FILE: &str = "favorites.json";

/// Favorites list with optional file persistence.
#[derive(Debug, Default)]
pub struct FavoritesStore {
    path: Option<PathBuf>,
    entries: Vec<MediaItem>,
}

impl FavoritesStore {
    /// Open the store persisted at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_entries(&path);
        tracing::debug!("Loaded {} favorites from {}", entries.len(), path.display());
        Self {
            path: Some(path),
            entries,
        }
    }

    /// Open the store in `data_dir`.
    pub fn open_in(data_dir: &Path) -> Self {
        Self::open(data_dir.join(FAVORITES_FILE))
    }

    /// A store that is never persisted.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[MediaItem] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: u64, kind: MediaKind) -> bool {
        self.entries.iter().any(|e| e.id == id && e.kind == kind)
    }

    pub fn is_favorite(&self, item: &MediaItem) -> bool {
        self.contains(item.id, item.kind)
    }

    /// Remove the entry matching `item`'s `(id, kind)`, or append `item` unmodified.
    ///
    /// Returns whether the item is a favorite afterwards. The list is persisted
    /// immediately; a failed write is logged and the in-memory change kept.
    pub fn toggle(&mut self, item: MediaItem) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|e| !(e.id == item.id && e.kind == item.kind));

        let now_favorite = self.entries.len() == before;
        if now_favorite {
            self.entries.push(item);
        }

        if let Err(e) = self.save() {
            tracing::warn!("Failed to save favorites: {}", e);
        }
        now_favorite
    }

    /// Serialize the full list to disk.
    pub fn save(&self) -> Result<()> {
        let Some(ref path) = self.path else {
            return Ok(());
        };
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write_atomic(path, &content)
    }
}

fn load_entries(path: &Path) -> Vec<MediaItem> {
    let content = match fs::read_optional(path) {
        Ok(Some(content)) => content,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!("Failed to read favorites {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    match serde_json::from_str(&content) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Failed to parse favorites {}: {}", path.display(), e);
            Vec::new()
        }
    }
}
