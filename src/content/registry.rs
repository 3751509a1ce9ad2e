//! ContentRegistry resource providing lookups for the catalog.

use bevy::prelude::*;
use std::collections::{BTreeMap, HashMap};

use super::data::*;

/// Label shown for a makeover whose character is no longer in the catalog.
pub const UNKNOWN_CHARACTER_NAME: &str = "Unknown";

/// Central registry for the immutable catalog.
/// Characters and levels are keyed by id; items keep catalog order.
#[derive(Resource, Debug, Default, Clone)]
pub struct ContentRegistry {
    pub characters: HashMap<String, CharacterDef>,
    pub items: Vec<MakeupItemDef>,
    pub levels: BTreeMap<u32, LevelDef>,
}

impl ContentRegistry {
    pub fn from_parts(
        characters: Vec<CharacterDef>,
        items: Vec<MakeupItemDef>,
        levels: Vec<LevelDef>,
    ) -> Self {
        Self {
            characters: characters
                .into_iter()
                .map(|c| (c.id.clone(), c))
                .collect(),
            items,
            levels: levels.into_iter().map(|l| (l.id, l)).collect(),
        }
    }

    pub fn find_character(&self, id: &str) -> Option<&CharacterDef> {
        self.characters.get(id)
    }

    pub fn find_level(&self, id: u32) -> Option<&LevelDef> {
        self.levels.get(&id)
    }

    pub fn find_item(&self, id: &str) -> Option<&MakeupItemDef> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items of one category, in catalog order.
    pub fn items_for_category(&self, category: ItemCategory) -> Vec<&MakeupItemDef> {
        self.items
            .iter()
            .filter(|item| item.category == category)
            .collect()
    }

    pub fn all_items(&self) -> &[MakeupItemDef] {
        &self.items
    }

    /// Every level offers the whole catalog; unknown levels offer nothing.
    pub fn items_for_level(&self, level_id: u32) -> &[MakeupItemDef] {
        if self.levels.contains_key(&level_id) {
            &self.items
        } else {
            &[]
        }
    }

    /// Levels in ascending id order.
    pub fn levels(&self) -> impl Iterator<Item = &LevelDef> {
        self.levels.values()
    }

    pub fn max_level_id(&self) -> u32 {
        self.levels.keys().next_back().copied().unwrap_or(0)
    }

    /// The level with no unlock requirement, if the catalog has one.
    pub fn root_level(&self) -> Option<&LevelDef> {
        self.levels.values().find(|level| level.is_root())
    }

    pub fn character_for_level(&self, level_id: u32) -> Option<&CharacterDef> {
        self.find_level(level_id)
            .and_then(|level| self.find_character(&level.character_id))
    }

    pub fn character_name_or_fallback(&self, id: &str) -> &str {
        self.find_character(id)
            .map(|c| c.name.as_str())
            .unwrap_or(UNKNOWN_CHARACTER_NAME)
    }

    /// Returns a summary of loaded content counts for logging.
    pub fn summary(&self) -> String {
        let per_category = ItemCategory::ALL
            .iter()
            .map(|c| format!("{} {}", self.items_for_category(*c).len(), c.as_str()))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "ContentRegistry loaded:\n\
             - Characters: {}\n\
             - Items: {} ({})\n\
             - Levels: {}",
            self.characters.len(),
            self.items.len(),
            per_category,
            self.levels.len(),
        )
    }
}
