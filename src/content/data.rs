//! Data definitions for all RON catalog files.
//!
//! These structs mirror the structure in assets/data/*.ron and are used
//! for deserialization. The ContentRegistry provides lookup by id.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// Common wrapper for RON files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

// ============================================================================
// Characters (characters.ron)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Reflect)]
pub struct CharacterDef {
    pub id: String,
    pub name: String,
    /// Image path relative to the asset root
    pub base_image: String,
    pub theme: String,
    pub unlocked_by_default: bool,
}

// ============================================================================
// Makeup items (items.ron)
// ============================================================================

/// The six cosmetic slots. Declaration order is the catalog order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize, Reflect,
)]
pub enum ItemCategory {
    Lips,
    Eyes,
    Cheeks,
    Hair,
    Accessories,
    Wings,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 6] = [
        ItemCategory::Lips,
        ItemCategory::Eyes,
        ItemCategory::Cheeks,
        ItemCategory::Hair,
        ItemCategory::Accessories,
        ItemCategory::Wings,
    ];

    /// Lowercase id, matching the prefix of item ids (e.g. "lips-1")
    pub fn as_str(self) -> &'static str {
        match self {
            ItemCategory::Lips => "lips",
            ItemCategory::Eyes => "eyes",
            ItemCategory::Cheeks => "cheeks",
            ItemCategory::Hair => "hair",
            ItemCategory::Accessories => "accessories",
            ItemCategory::Wings => "wings",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ItemCategory::Lips => "Lips",
            ItemCategory::Eyes => "Eyes",
            ItemCategory::Cheeks => "Cheeks",
            ItemCategory::Hair => "Hair",
            ItemCategory::Accessories => "Accessories",
            ItemCategory::Wings => "Wings",
        }
    }
}

/// Cosmetic only; never affects scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Reflect, Default)]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Legendary,
}

/// Placement relative to the character anchor
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize, Reflect)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Reflect)]
pub struct MakeupItemDef {
    pub id: String,
    pub name: String,
    pub category: ItemCategory,
    pub image: String,
    pub rarity: Rarity,
    /// Default placement used when the player drops the item without adjusting it
    pub offset: Offset,
    pub scale: Option<f32>,
}

// ============================================================================
// Levels (levels.ron)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Reflect)]
pub struct LevelDef {
    pub id: u32,
    pub name: String,
    pub character_id: String,
    pub background: String,
    /// Level that must be unlocked before this one is playable.
    /// `None` marks the single always-open first level.
    pub unlock_requirement: Option<u32>,
}

impl LevelDef {
    pub fn is_root(&self) -> bool {
        self.unlock_requirement.is_none()
    }
}
