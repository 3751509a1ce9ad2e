//! Session domain: the live in-memory game state.

use crate::content::{ItemCategory, LevelDef, MakeupItemDef, Offset};
use crate::core::Screen;
use crate::progress::GameProgress;

/// One catalog item placed on the current makeover.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedItem {
    pub item: MakeupItemDef,
    pub position: Offset,
    /// Degrees
    pub rotation: f32,
    pub scale: f32,
}

impl AppliedItem {
    /// Freshly placed: no rotation, unit scale.
    pub fn placed(item: MakeupItemDef, position: Offset) -> Self {
        Self {
            item,
            position,
            rotation: 0.0,
            scale: 1.0,
        }
    }
}

/// Everything the presentation layer renders from.
///
/// `screen`, `applied_items` and `selected_category` are transient. Only
/// `progress` is ever persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub screen: Screen,
    pub current_level: Option<LevelDef>,
    /// Application order; the last entry is the most recent.
    pub applied_items: Vec<AppliedItem>,
    pub selected_category: Option<ItemCategory>,
    pub progress: GameProgress,
    /// Gates first paint until progress has been loaded
    pub is_loading: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameProgress::default())
    }
}

impl GameState {
    pub fn new(progress: GameProgress) -> Self {
        Self {
            screen: Screen::Menu,
            current_level: None,
            applied_items: Vec::new(),
            selected_category: None,
            progress,
            is_loading: true,
        }
    }

    pub fn last_applied(&self) -> Option<&AppliedItem> {
        self.applied_items.last()
    }

    /// Applied item ids in application order.
    pub fn applied_item_ids(&self) -> Vec<String> {
        self.applied_items
            .iter()
            .map(|applied| applied.item.id.clone())
            .collect()
    }
}
