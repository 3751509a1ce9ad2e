//! Progress domain: persisted player progress and its storage.

mod backend;
mod store;
mod types;

pub use backend::{FileBackend, MemoryBackend, ProgressBackend, StorageError};
pub use store::{ProgressStore, STORAGE_KEY};
pub use types::{GameProgress, GameSettings, MAX_STARS, ROOT_LEVEL_ID, SavedMakeover};
