//! Progress domain: load/save/reset of persisted progress.
//!
//! None of the public operations fail. Read problems fall back to the
//! defaults and write problems are logged, so a broken disk costs durability
//! but never the session.

use bevy::prelude::*;

use super::backend::{ProgressBackend, StorageError};
use super::types::{GameProgress, StoredProgress};

/// Fixed logical key the progress blob is stored under.
pub const STORAGE_KEY: &str = "enchanted_glamour_kingdom_progress";

pub struct ProgressStore {
    backend: Box<dyn ProgressBackend>,
    defaults: GameProgress,
}

impl std::fmt::Debug for ProgressStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressStore")
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

impl ProgressStore {
    pub fn new(backend: impl ProgressBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            defaults: GameProgress::default(),
        }
    }

    /// Replace the progress used for fresh profiles and missing fields.
    pub fn with_defaults(mut self, defaults: GameProgress) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn defaults(&self) -> &GameProgress {
        &self.defaults
    }

    /// Stored progress reconciled with the defaults, or the defaults when
    /// nothing usable is stored.
    pub fn load(&self) -> GameProgress {
        match self.try_load() {
            Ok(Some(progress)) => progress,
            Ok(None) => {
                debug!("No saved progress under '{}', starting fresh", STORAGE_KEY);
                self.defaults.clone()
            }
            Err(e) => {
                warn!("Failed to load progress: {}", e);
                self.defaults.clone()
            }
        }
    }

    fn try_load(&self) -> Result<Option<GameProgress>, StorageError> {
        let Some(raw) = self.backend.read(STORAGE_KEY)? else {
            return Ok(None);
        };
        let stored: StoredProgress =
            serde_json::from_str(&raw).map_err(StorageError::Deserialize)?;
        Ok(Some(stored.reconcile(&self.defaults)))
    }

    pub fn save(&mut self, progress: &GameProgress) {
        if let Err(e) = self.try_save(progress) {
            error!("Failed to save progress: {}", e);
        }
    }

    fn try_save(&mut self, progress: &GameProgress) -> Result<(), StorageError> {
        let raw = serde_json::to_string(progress).map_err(StorageError::Serialize)?;
        self.backend.write(STORAGE_KEY, &raw)
    }

    /// Clear persisted state and hand back a fresh profile.
    pub fn reset(&mut self) -> GameProgress {
        if let Err(e) = self.backend.remove(STORAGE_KEY) {
            error!("Failed to reset progress: {}", e);
        }
        self.defaults.clone()
    }

    /// Unlock `level_id` and persist. Already unlocked levels return the
    /// progress untouched without writing.
    pub fn unlock(&mut self, mut progress: GameProgress, level_id: u32) -> GameProgress {
        if progress.unlock(level_id) {
            self.save(&progress);
        }
        progress
    }

    pub fn has_saved_progress(&self) -> bool {
        matches!(self.backend.read(STORAGE_KEY), Ok(Some(_)))
    }
}
