//! Session domain: the closed set of actions the reducer understands.

use bevy::ecs::message::Message;

use crate::content::{ItemCategory, LevelDef, MakeupItemDef, Offset};
use crate::core::Screen;
use crate::progress::GameProgress;

#[derive(Debug, Clone, PartialEq)]
pub enum GameAction {
    /// Unguarded navigation
    SetScreen(Screen),
    /// Enter a level with an empty makeover. Unlock checks happen before dispatch.
    SelectLevel(LevelDef),
    ApplyItem {
        item: MakeupItemDef,
        position: Offset,
    },
    /// Undo; nothing happens when the makeover is empty
    RemoveLastItem,
    ResetMakeover,
    SelectCategory(Option<ItemCategory>),
    /// Record the current makeover with an externally computed score
    CompleteLevel {
        stars: u8,
    },
    LoadProgress(GameProgress),
    SetLoading(bool),
    ToggleMusic,
    ToggleSfx,
    SetMusicVolume(f32),
    SetSfxVolume(f32),
    /// Wipe every unlock, makeover and setting
    ResetProgress,
}

impl Message for GameAction {}
