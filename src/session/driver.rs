//! Session domain: the resource that drives the reducer and runs its effects.

use bevy::prelude::*;
use chrono::Utc;

use crate::content::{ContentRegistry, ItemCategory, Offset};
use crate::core::GameConfig;
use crate::progress::{FileBackend, GameProgress, ProgressStore};
use crate::rules::{calculate_stars, is_level_unlocked};
use crate::session::actions::GameAction;
use crate::session::reducer::{Effect, TransitionContext, reduce};
use crate::session::state::GameState;

/// Row of the level select screen.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelStatus {
    pub level_id: u32,
    pub name: String,
    pub character_name: String,
    pub unlocked: bool,
    pub best_stars: u8,
}

/// Owns the live state and the progress store. Constructed once and handed
/// to whatever drives the game.
#[derive(Resource, Debug)]
pub struct Session {
    state: GameState,
    store: ProgressStore,
    starting_category: ItemCategory,
}

impl Session {
    pub fn new(store: ProgressStore, starting_category: ItemCategory) -> Self {
        Self {
            state: GameState::new(store.defaults().clone()),
            store,
            starting_category,
        }
    }

    /// File-backed session as configured in game_config.ron.
    pub fn from_config(config: &GameConfig) -> Self {
        let store = ProgressStore::new(FileBackend::new(config.save_dir()))
            .with_defaults(config.default_progress());
        Self::new(store, config.starting_category)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    /// Load persisted progress and lift the loading gate.
    pub fn load(&mut self, registry: &ContentRegistry) {
        let progress = self.store.load();
        info!(
            "Progress loaded: {} unlocked levels, {} makeovers, {} stars",
            progress.unlocked_levels.len(),
            progress.collection.len(),
            progress.total_stars
        );
        self.dispatch(GameAction::LoadProgress(progress), registry);
    }

    pub fn dispatch(&mut self, action: GameAction, registry: &ContentRegistry) {
        self.dispatch_at(action, registry, Utc::now().timestamp_millis());
    }

    /// Dispatch with an explicit clock reading.
    pub fn dispatch_at(
        &mut self,
        action: GameAction,
        registry: &ContentRegistry,
        now_millis: i64,
    ) {
        debug!("Dispatching {:?}", action);

        let settings_action = matches!(
            action,
            GameAction::ToggleMusic
                | GameAction::ToggleSfx
                | GameAction::SetMusicVolume(_)
                | GameAction::SetSfxVolume(_)
        );
        let mark = ProgressMark::before(&action, &self.state.progress);

        let ctx = TransitionContext {
            now_millis,
            max_level_id: registry.max_level_id(),
            starting_category: self.starting_category,
            defaults: self.store.defaults(),
        };
        let transition = reduce(std::mem::take(&mut self.state), action, &ctx);
        self.state = transition.state;

        let progress = &self.state.progress;
        for event in mark.completion_events(progress) {
            info!("{}", event);
        }
        if settings_action {
            let settings = &progress.settings;
            info!(
                "Settings: music {} ({:.2}), sfx {} ({:.2})",
                on_off(settings.music_enabled),
                settings.music_volume,
                on_off(settings.sfx_enabled),
                settings.sfx_volume
            );
        }

        for effect in transition.effects {
            match effect {
                Effect::SaveProgress => self.store.save(&self.state.progress),
                Effect::ClearSavedProgress => {
                    self.store.reset();
                    info!("Progress reset");
                }
            }
        }
    }

    /// Enter a level if the unlock policy allows it.
    pub fn select_level(&mut self, level_id: u32, registry: &ContentRegistry) -> bool {
        let Some(level) = registry.find_level(level_id) else {
            warn!("Cannot select unknown level {}", level_id);
            return false;
        };
        if !is_level_unlocked(level_id, &self.state.progress.unlocked_levels, registry) {
            debug!("Level {} is locked", level_id);
            return false;
        }
        self.dispatch(GameAction::SelectLevel(level.clone()), registry);
        true
    }

    /// Apply a catalog item at its default offset.
    pub fn apply_item(&mut self, item_id: &str, registry: &ContentRegistry) -> bool {
        let Some(position) = registry.find_item(item_id).map(|item| item.offset) else {
            warn!("Cannot apply unknown item '{}'", item_id);
            return false;
        };
        self.apply_item_at(item_id, position, registry)
    }

    /// Apply a catalog item at a player-adjusted position.
    pub fn apply_item_at(
        &mut self,
        item_id: &str,
        position: Offset,
        registry: &ContentRegistry,
    ) -> bool {
        let Some(item) = registry.find_item(item_id) else {
            warn!("Cannot apply unknown item '{}'", item_id);
            return false;
        };
        self.dispatch(
            GameAction::ApplyItem {
                item: item.clone(),
                position,
            },
            registry,
        );
        true
    }

    /// Score the current makeover and record it. Returns the stars earned.
    pub fn complete_makeover(&mut self, registry: &ContentRegistry) -> u8 {
        let stars = calculate_stars(&self.state.applied_items);
        self.dispatch(GameAction::CompleteLevel { stars }, registry);
        stars
    }

    pub fn level_overview(&self, registry: &ContentRegistry) -> Vec<LevelStatus> {
        let progress = &self.state.progress;
        registry
            .levels()
            .map(|level| LevelStatus {
                level_id: level.id,
                name: level.name.clone(),
                character_name: registry
                    .character_name_or_fallback(&level.character_id)
                    .to_string(),
                unlocked: is_level_unlocked(level.id, &progress.unlocked_levels, registry),
                best_stars: progress.best_stars_for_level(level.id),
            })
            .collect()
    }
}

/// Progress counts taken before a transition. Only a `CompleteLevel`
/// reports completions; a load that brings in a saved collection does not.
pub(crate) struct ProgressMark {
    completing: bool,
    completed: usize,
    unlocked: usize,
}

impl ProgressMark {
    pub(crate) fn before(action: &GameAction, progress: &GameProgress) -> Self {
        Self {
            completing: matches!(action, GameAction::CompleteLevel { .. }),
            completed: progress.collection.len(),
            unlocked: progress.unlocked_levels.len(),
        }
    }

    pub(crate) fn completion_events(&self, after: &GameProgress) -> Vec<String> {
        if !self.completing || after.collection.len() <= self.completed {
            return Vec::new();
        }
        let Some(makeover) = after.latest_makeover() else {
            return Vec::new();
        };

        let mut events = vec![format!(
            "Level {} completed with {} stars (total {})",
            makeover.level_id, makeover.stars, after.total_stars
        )];
        events.extend(
            after
                .unlocked_levels
                .iter()
                .skip(self.unlocked)
                .map(|level_id| format!("Level {} unlocked", level_id)),
        );
        events
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}
