//! Progress domain: the durable player-progress aggregate.
//!
//! Field names serialize in camelCase to match the persisted JSON blob.

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Id of the level that is unlocked on a fresh profile.
pub const ROOT_LEVEL_ID: u32 = 1;

/// Highest star rating a makeover can earn.
pub const MAX_STARS: u8 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSettings {
    pub music_enabled: bool,
    pub sfx_enabled: bool,
    /// 0.0..=1.0
    pub music_volume: f32,
    /// 0.0..=1.0
    pub sfx_volume: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            music_enabled: true,
            sfx_enabled: true,
            music_volume: 0.5,
            sfx_volume: 0.7,
        }
    }
}

impl GameSettings {
    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = clamp_volume(volume, self.music_volume);
    }

    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.sfx_volume = clamp_volume(volume, self.sfx_volume);
    }
}

/// NaN keeps the previous value.
pub(crate) fn clamp_volume(volume: f32, previous: f32) -> f32 {
    if volume.is_nan() {
        previous
    } else {
        volume.clamp(0.0, 1.0)
    }
}

/// One finished makeover. Items are stored by id so catalog edits never
/// rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedMakeover {
    pub id: String,
    pub level_id: u32,
    pub character_id: String,
    #[serde(default)]
    pub applied_items: Vec<String>,
    pub stars: u8,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameProgress {
    /// Last level the player worked on. Informational only.
    pub current_level: u32,
    /// Grows only; order is unlock order.
    pub unlocked_levels: Vec<u32>,
    pub collection: Vec<SavedMakeover>,
    /// Sum of every makeover's stars, repeats included
    pub total_stars: u32,
    pub settings: GameSettings,
}

impl Default for GameProgress {
    fn default() -> Self {
        Self::with_settings(GameSettings::default())
    }
}

impl GameProgress {
    pub fn with_settings(settings: GameSettings) -> Self {
        Self {
            current_level: ROOT_LEVEL_ID,
            unlocked_levels: vec![ROOT_LEVEL_ID],
            collection: Vec::new(),
            total_stars: 0,
            settings,
        }
    }

    pub fn is_unlocked(&self, level_id: u32) -> bool {
        self.unlocked_levels.contains(&level_id)
    }

    /// Adds `level_id` to the unlocked set. Returns false when it was
    /// already there.
    pub fn unlock(&mut self, level_id: u32) -> bool {
        if self.is_unlocked(level_id) {
            return false;
        }
        self.unlocked_levels.push(level_id);
        true
    }

    /// Appends a makeover and keeps `total_stars` in step with it.
    pub fn record_makeover(&mut self, makeover: SavedMakeover) {
        self.total_stars = self.total_stars.saturating_add(u32::from(makeover.stars));
        self.collection.push(makeover);
    }

    pub fn latest_makeover(&self) -> Option<&SavedMakeover> {
        self.collection.last()
    }

    pub fn completions_for_level(&self, level_id: u32) -> usize {
        self.collection
            .iter()
            .filter(|m| m.level_id == level_id)
            .count()
    }

    /// Best star count ever earned on a level, 0 if never completed.
    pub fn best_stars_for_level(&self, level_id: u32) -> u8 {
        self.collection
            .iter()
            .filter(|m| m.level_id == level_id)
            .map(|m| m.stars)
            .max()
            .unwrap_or(0)
    }

    /// Best makeover per level, ordered by level id. The earliest entry wins ties.
    pub fn best_makeovers(&self) -> Vec<&SavedMakeover> {
        let mut best: BTreeMap<u32, &SavedMakeover> = BTreeMap::new();
        for makeover in &self.collection {
            match best.get(&makeover.level_id) {
                Some(existing) if existing.stars >= makeover.stars => {}
                _ => {
                    best.insert(makeover.level_id, makeover);
                }
            }
        }
        best.into_values().collect()
    }
}

// ============================================================================
// Stored shape: every field optional so older, partial or damaged saves
// still load. A field that fails to decode counts as missing.
// ============================================================================

/// Decode a field on its own, turning a malformed value into `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Decode makeovers one by one, dropping entries that no longer parse.
fn lenient_collection<'de, D>(deserializer: D) -> Result<Option<Vec<SavedMakeover>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(entries) = lenient::<D, Vec<serde_json::Value>>(deserializer)? else {
        return Ok(None);
    };
    let total = entries.len();
    let collection: Vec<SavedMakeover> = entries
        .into_iter()
        .filter_map(|entry| SavedMakeover::deserialize(entry).ok())
        .collect();
    if collection.len() < total {
        warn!(
            "Dropped {} unreadable makeovers from saved progress",
            total - collection.len()
        );
    }
    Ok(Some(collection))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct StoredSettings {
    #[serde(deserialize_with = "lenient")]
    music_enabled: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    sfx_enabled: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    music_volume: Option<f32>,
    #[serde(deserialize_with = "lenient")]
    sfx_volume: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct StoredProgress {
    #[serde(deserialize_with = "lenient")]
    current_level: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    unlocked_levels: Option<Vec<u32>>,
    #[serde(deserialize_with = "lenient_collection")]
    collection: Option<Vec<SavedMakeover>>,
    #[serde(deserialize_with = "lenient")]
    total_stars: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    settings: Option<StoredSettings>,
}

impl StoredProgress {
    /// Reconcile against `defaults` field by field.
    pub(crate) fn reconcile(self, defaults: &GameProgress) -> GameProgress {
        let settings = self.settings.unwrap_or_default();
        let base = &defaults.settings;
        let settings = GameSettings {
            music_enabled: settings.music_enabled.unwrap_or(base.music_enabled),
            sfx_enabled: settings.sfx_enabled.unwrap_or(base.sfx_enabled),
            music_volume: settings
                .music_volume
                .map_or(base.music_volume, |v| clamp_volume(v, base.music_volume)),
            sfx_volume: settings
                .sfx_volume
                .map_or(base.sfx_volume, |v| clamp_volume(v, base.sfx_volume)),
        };

        // Stored order without repeats; default unlocks missing from it go in front
        let mut unlocked_levels: Vec<u32> = Vec::new();
        for level_id in self.unlocked_levels.unwrap_or_default() {
            if !unlocked_levels.contains(&level_id) {
                unlocked_levels.push(level_id);
            }
        }
        let missing: Vec<u32> = defaults
            .unlocked_levels
            .iter()
            .copied()
            .filter(|id| !unlocked_levels.contains(id))
            .collect();
        unlocked_levels.splice(0..0, missing);

        let collection = self
            .collection
            .unwrap_or_else(|| defaults.collection.clone());
        let total_stars = self.total_stars.unwrap_or_else(|| {
            collection.iter().map(|m| u32::from(m.stars)).sum()
        });

        GameProgress {
            current_level: self.current_level.unwrap_or(defaults.current_level),
            unlocked_levels,
            collection,
            total_stars,
            settings,
        }
    }
}
