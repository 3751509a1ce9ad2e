//! Core domain: screen states for the game flow.

use bevy::prelude::*;

/// Which screen the player is on. `Menu` is the entry screen once loading ends.
#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Copy, Default)]
pub enum Screen {
    #[default]
    Menu,
    LevelSelect,
    Game,
    Result,
    Collection,
}
