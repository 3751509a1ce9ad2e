//! Rules domain: level access gating.

use crate::content::ContentRegistry;

/// A level is open when it has no requirement or its required level is in
/// `unlocked_levels`. Unknown levels are never open.
pub fn is_level_unlocked(
    level_id: u32,
    unlocked_levels: &[u32],
    registry: &ContentRegistry,
) -> bool {
    match registry.find_level(level_id) {
        None => false,
        Some(level) => match level.unlock_requirement {
            None => true,
            Some(required) => unlocked_levels.contains(&required),
        },
    }
}

/// Level id the completion of `level_id` opens, if any.
pub fn next_level_to_unlock(level_id: u32, max_level_id: u32) -> Option<u32> {
    let next = level_id.checked_add(1)?;
    (next <= max_level_id).then_some(next)
}
