//! Content domain: the read-only catalog of characters, makeup items and levels.

mod data;
mod loader;
mod registry;
mod validation;

pub use data::{CharacterDef, ItemCategory, LevelDef, MakeupItemDef, Offset, Rarity};
pub use loader::{ContentLoadError, builtin_content, load_all_content};
pub(crate) use loader::load_single_file;
pub use registry::{ContentRegistry, UNKNOWN_CHARACTER_NAME};
pub use validation::{ValidationError, validate_content};

use bevy::prelude::*;
use std::path::Path;

/// Directory holding the catalog and config RON files.
pub const ASSET_DATA_DIR: &str = "assets/data";

/// How the catalog was obtained, reported once logging is up.
#[derive(Resource, Debug, Default)]
struct ContentSource {
    disk_errors: Vec<String>,
}

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        let (registry, source) = load_registry(Path::new(ASSET_DATA_DIR));

        app.register_type::<CharacterDef>()
            .register_type::<MakeupItemDef>()
            .register_type::<LevelDef>()
            .register_type::<ItemCategory>()
            .register_type::<Rarity>()
            .register_type::<Offset>()
            .insert_resource(registry)
            .insert_resource(source)
            .add_systems(Startup, report_content);
    }
}

/// Disk files win when they load; otherwise the embedded catalog is used.
fn load_registry(base_path: &Path) -> (ContentRegistry, ContentSource) {
    match load_all_content(base_path) {
        Ok(registry) => (registry, ContentSource::default()),
        Err(errors) => {
            let source = ContentSource {
                disk_errors: errors.iter().map(|e| e.to_string()).collect(),
            };
            // The embedded files are the same RON, checked by the content tests
            let registry = builtin_content().unwrap_or_default();
            (registry, source)
        }
    }
}

fn report_content(registry: Res<ContentRegistry>, source: Res<ContentSource>) {
    for error in &source.disk_errors {
        warn!("{}; using embedded catalog", error);
    }

    info!("{}", registry.summary());

    for error in validate_content(&registry) {
        warn!("Catalog validation: {}", error);
    }
}
