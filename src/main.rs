use bevy::prelude::*;
use glamour_kingdom::{content::ContentPlugin, core::CorePlugin, session::SessionPlugin};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Enchanted Glamour Kingdom".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins((CorePlugin, ContentPlugin, SessionPlugin))
        .run();
}
