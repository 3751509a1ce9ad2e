//! Session domain: the game state machine and its orchestration.

mod actions;
mod driver;
mod reducer;
mod state;
mod systems;
#[cfg(test)]
mod tests;

pub use actions::GameAction;
pub use driver::{LevelStatus, Session};
pub use reducer::{Effect, Transition, TransitionContext, reduce};
pub use state::{AppliedItem, GameState};

use bevy::prelude::*;

use crate::core::GameConfig;
use crate::session::systems::{load_saved_progress, process_game_actions, sync_screen_state};

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        // A session inserted up front (tests, tools) wins over the configured one
        if !app.world().contains_resource::<Session>() {
            let config = app
                .world()
                .get_resource::<GameConfig>()
                .cloned()
                .unwrap_or_default();
            app.insert_resource(Session::from_config(&config));
        }

        app.add_message::<GameAction>()
            .add_systems(Startup, load_saved_progress)
            .add_systems(Update, (process_game_actions, sync_screen_state).chain());
    }
}
