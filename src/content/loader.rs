//! Loader for RON content files at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::*;
use super::registry::ContentRegistry;

const EMBEDDED_CHARACTERS: &str = include_str!("../../assets/data/characters.ron");
const EMBEDDED_ITEMS: &str = include_str!("../../assets/data/items.ron");
const EMBEDDED_LEVELS: &str = include_str!("../../assets/data/levels.ron");

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ContentLoadError {}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

fn read_file(path: &Path) -> Result<String, ContentLoadError> {
    fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: path.display().to_string(),
        message: format!("IO error: {}", e),
    })
}

/// Parse the contents of a RON file containing a DataFile<T> wrapper.
fn parse_data_file<T>(file_name: &str, contents: &str) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let data: DataFile<T> = ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file_name.to_string(),
            message: format!("Parse error: {}", e),
        })?;

    Ok(data.items)
}

/// Load a single RON struct (not wrapped in DataFile).
pub(crate) fn load_single_file<T>(path: &Path) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let contents = read_file(path)?;

    ron_options()
        .from_str(&contents)
        .map_err(|e| ContentLoadError {
            file: path.display().to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Build a registry from the three catalog sources, collecting every failure.
fn build_registry(
    characters: Result<Vec<CharacterDef>, ContentLoadError>,
    items: Result<Vec<MakeupItemDef>, ContentLoadError>,
    levels: Result<Vec<LevelDef>, ContentLoadError>,
) -> Result<ContentRegistry, Vec<ContentLoadError>> {
    match (characters, items, levels) {
        (Ok(characters), Ok(items), Ok(levels)) => {
            Ok(ContentRegistry::from_parts(characters, items, levels))
        }
        (characters, items, levels) => Err([characters.err(), items.err(), levels.err()]
            .into_iter()
            .flatten()
            .collect()),
    }
}

/// Load the catalog from assets/data/*.ron under `base_path`.
/// Returns errors for any files that fail to load.
pub fn load_all_content(base_path: &Path) -> Result<ContentRegistry, Vec<ContentLoadError>> {
    // Helper macro to reduce boilerplate
    macro_rules! load {
        ($file:expr, $type:ty) => {{
            let path = base_path.join($file);
            read_file(&path)
                .and_then(|contents| parse_data_file::<$type>(&path.display().to_string(), &contents))
        }};
    }

    build_registry(
        load!("characters.ron", CharacterDef),
        load!("items.ron", MakeupItemDef),
        load!("levels.ron", LevelDef),
    )
}

/// The catalog compiled into the binary.
pub fn builtin_content() -> Result<ContentRegistry, Vec<ContentLoadError>> {
    build_registry(
        parse_data_file("embedded characters.ron", EMBEDDED_CHARACTERS),
        parse_data_file("embedded items.ron", EMBEDDED_ITEMS),
        parse_data_file("embedded levels.ron", EMBEDDED_LEVELS),
    )
}
