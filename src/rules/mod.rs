//! Rules domain: pure scoring and unlock policies.

mod scoring;
mod unlock;

pub use scoring::{calculate_stars, is_makeover_complete, missing_categories, star_message};
pub use unlock::{is_level_unlocked, next_level_to_unlock};
