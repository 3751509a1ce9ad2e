//! Enchanted Glamour Kingdom: catalog, progress, scoring and the game
//! state machine, exposed as Bevy plugins.

pub mod content;
pub mod core;
pub mod progress;
pub mod rules;
pub mod session;
