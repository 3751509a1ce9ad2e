//! Validation for cross-references between catalog definitions.

use std::collections::HashSet;

use super::registry::ContentRegistry;

/// A validation error with context about what failed.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A definition points at an id that is not in the catalog
    MissingReference {
        source_type: &'static str,
        source_id: String,
        field: &'static str,
        target_type: &'static str,
        missing_id: String,
    },
    /// Zero or several levels without an unlock requirement
    RootLevelCount(usize),
    /// Level ids do not form 1..=N
    NonContiguousLevels { expected: u32, found: u32 },
    DuplicateItemId(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingReference {
                source_type,
                source_id,
                field,
                target_type,
                missing_id,
            } => write!(
                f,
                "{} '{}' references missing {} '{}' in field '{}'",
                source_type, source_id, target_type, missing_id, field
            ),
            ValidationError::RootLevelCount(count) => write!(
                f,
                "expected exactly one level without unlock requirement, found {}",
                count
            ),
            ValidationError::NonContiguousLevels { expected, found } => {
                write!(f, "expected level id {} but found {}", expected, found)
            }
            ValidationError::DuplicateItemId(id) => write!(f, "item id '{}' is duplicated", id),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate all cross-references in the registry.
/// Returns a list of validation errors, empty if the catalog is consistent.
pub fn validate_content(registry: &ContentRegistry) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for level in registry.levels() {
        if registry.find_character(&level.character_id).is_none() {
            errors.push(ValidationError::MissingReference {
                source_type: "Level",
                source_id: level.id.to_string(),
                field: "character_id",
                target_type: "Character",
                missing_id: level.character_id.clone(),
            });
        }
        if let Some(required) = level.unlock_requirement
            && registry.find_level(required).is_none()
        {
            errors.push(ValidationError::MissingReference {
                source_type: "Level",
                source_id: level.id.to_string(),
                field: "unlock_requirement",
                target_type: "Level",
                missing_id: required.to_string(),
            });
        }
    }

    let roots = registry.levels().filter(|level| level.is_root()).count();
    if roots != 1 {
        errors.push(ValidationError::RootLevelCount(roots));
    }

    // BTreeMap keys are sorted, so contiguity is a simple walk from 1
    for (expected, found) in (1u32..).zip(registry.levels.keys().copied()) {
        if expected != found {
            errors.push(ValidationError::NonContiguousLevels { expected, found });
            break;
        }
    }

    let mut seen = HashSet::new();
    for item in registry.all_items() {
        if !seen.insert(item.id.as_str()) {
            errors.push(ValidationError::DuplicateItemId(item.id.clone()));
        }
    }

    errors
}
