//! Core domain: screen states, configuration and app setup.

mod config;
mod state;

pub use config::{CONFIG_FILE, GameConfig, SAVE_DIR_ENV, load_game_config, resolve_save_dir};
pub use state::Screen;

use bevy::prelude::*;
use std::path::Path;

use crate::content::ASSET_DATA_DIR;

/// Config problem found while building the app, reported once logging is up.
#[derive(Resource, Debug, Default)]
struct ConfigLoadIssue(Option<String>);

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let (config, issue) = match load_game_config(Path::new(ASSET_DATA_DIR)) {
            Ok(config) => (config, None),
            Err(e) => (GameConfig::default(), Some(e.to_string())),
        };

        app.init_state::<Screen>()
            .insert_resource(config)
            .insert_resource(ConfigLoadIssue(issue))
            .add_systems(Startup, (report_config, setup_camera));
    }
}

fn report_config(config: Res<GameConfig>, issue: Res<ConfigLoadIssue>) {
    if let Some(error) = &issue.0 {
        warn!("{}; using default config", error);
    }
    info!(
        "Saving progress under {} (starting category: {})",
        config.save_dir().display(),
        config.starting_category.label()
    );
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
