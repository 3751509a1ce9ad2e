//! Core domain: game configuration loaded from game_config.ron.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::content::{ContentLoadError, ItemCategory, load_single_file};
use crate::progress::{GameProgress, GameSettings};

/// Environment variable that overrides `save_dir`.
pub const SAVE_DIR_ENV: &str = "GLAMOUR_SAVE_DIR";

pub const CONFIG_FILE: &str = "game_config.ron";

/// Folder created under the per-user data directory.
const APP_DIR_NAME: &str = "enchanted-glamour-kingdom";

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GameConfig {
    /// Directory holding the progress file. Unset means the per-user data dir.
    pub save_dir: Option<String>,
    /// Category the item picker opens on when a level starts
    pub starting_category: ItemCategory,
    /// Settings for a fresh profile
    pub default_settings: GameSettings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            save_dir: None,
            starting_category: ItemCategory::Lips,
            default_settings: GameSettings::default(),
        }
    }
}

impl GameConfig {
    /// Save directory after applying the environment override.
    pub fn save_dir(&self) -> PathBuf {
        resolve_save_dir(std::env::var_os(SAVE_DIR_ENV), self.save_dir.as_deref())
    }

    pub fn default_progress(&self) -> GameProgress {
        GameProgress::with_settings(self.default_settings.clone())
    }
}

/// Non-empty env override, then the configured dir, then
/// `<data dir>/enchanted-glamour-kingdom`, then `./saves`.
pub fn resolve_save_dir(env_override: Option<OsString>, configured: Option<&str>) -> PathBuf {
    if let Some(dir) = env_override.filter(|dir| !dir.is_empty()) {
        return PathBuf::from(dir);
    }
    if let Some(dir) = configured.filter(|dir| !dir.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("saves"))
}

/// Read the config from `base_path`, keeping the error for the caller to log.
pub fn load_game_config(base_path: &Path) -> Result<GameConfig, ContentLoadError> {
    load_single_file(&base_path.join(CONFIG_FILE))
}
