//! Session domain: the pure state transition function.
//!
//! `reduce` never touches storage. Transitions that change persisted fields
//! report it through `Effect`s and the caller performs them.

use crate::content::ItemCategory;
use crate::core::Screen;
use crate::progress::{GameProgress, MAX_STARS, SavedMakeover};
use crate::rules::next_level_to_unlock;
use crate::session::actions::GameAction;
use crate::session::state::{AppliedItem, GameState};

/// Inputs a transition needs from outside the state.
#[derive(Debug, Clone, Copy)]
pub struct TransitionContext<'a> {
    /// Completion time, milliseconds since the Unix epoch
    pub now_millis: i64,
    /// Highest level id in the catalog
    pub max_level_id: u32,
    pub starting_category: ItemCategory,
    /// Fresh-profile progress, used by `ResetProgress`
    pub defaults: &'a GameProgress,
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Persist `state.progress`
    SaveProgress,
    /// Delete the persisted progress
    ClearSavedProgress,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: GameState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn pure(state: GameState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn with_effect(state: GameState, effect: Effect) -> Self {
        Self {
            state,
            effects: vec![effect],
        }
    }
}

pub fn reduce(mut state: GameState, action: GameAction, ctx: &TransitionContext) -> Transition {
    match action {
        GameAction::SetScreen(screen) => {
            state.screen = screen;
            Transition::pure(state)
        }
        GameAction::SelectLevel(level) => {
            state.current_level = Some(level);
            state.applied_items.clear();
            state.selected_category = Some(ctx.starting_category);
            state.screen = Screen::Game;
            Transition::pure(state)
        }
        GameAction::ApplyItem { item, position } => {
            state.applied_items.push(AppliedItem::placed(item, position));
            Transition::pure(state)
        }
        GameAction::RemoveLastItem => {
            state.applied_items.pop();
            Transition::pure(state)
        }
        GameAction::ResetMakeover => {
            state.applied_items.clear();
            Transition::pure(state)
        }
        GameAction::SelectCategory(category) => {
            state.selected_category = category;
            Transition::pure(state)
        }
        GameAction::CompleteLevel { stars } => complete_level(state, stars, ctx),
        GameAction::LoadProgress(progress) => {
            state.progress = progress;
            state.is_loading = false;
            Transition::pure(state)
        }
        GameAction::SetLoading(is_loading) => {
            state.is_loading = is_loading;
            Transition::pure(state)
        }
        GameAction::ToggleMusic => {
            let settings = &mut state.progress.settings;
            settings.music_enabled = !settings.music_enabled;
            Transition::with_effect(state, Effect::SaveProgress)
        }
        GameAction::ToggleSfx => {
            let settings = &mut state.progress.settings;
            settings.sfx_enabled = !settings.sfx_enabled;
            Transition::with_effect(state, Effect::SaveProgress)
        }
        GameAction::SetMusicVolume(volume) => {
            state.progress.settings.set_music_volume(volume);
            Transition::with_effect(state, Effect::SaveProgress)
        }
        GameAction::SetSfxVolume(volume) => {
            state.progress.settings.set_sfx_volume(volume);
            Transition::with_effect(state, Effect::SaveProgress)
        }
        GameAction::ResetProgress => {
            state.progress = ctx.defaults.clone();
            state.current_level = None;
            state.applied_items.clear();
            state.selected_category = None;
            state.screen = Screen::Menu;
            Transition::with_effect(state, Effect::ClearSavedProgress)
        }
    }
}

fn complete_level(mut state: GameState, stars: u8, ctx: &TransitionContext) -> Transition {
    let (level_id, character_id) = match &state.current_level {
        Some(level) => (level.id, level.character_id.clone()),
        None => return Transition::pure(state),
    };

    let makeover = SavedMakeover {
        id: makeover_id(level_id, ctx.now_millis, &state.progress.collection),
        level_id,
        character_id,
        applied_items: state.applied_item_ids(),
        stars: stars.min(MAX_STARS),
        timestamp: ctx.now_millis,
        screenshot_url: None,
    };

    let progress = &mut state.progress;
    progress.record_makeover(makeover);
    progress.current_level = level_id;
    if let Some(next) = next_level_to_unlock(level_id, ctx.max_level_id) {
        progress.unlock(next);
    }

    state.screen = Screen::Result;
    Transition::with_effect(state, Effect::SaveProgress)
}

/// `{level}-{millis}`, suffixed with `-2`, `-3`, ... if that id is taken.
fn makeover_id(level_id: u32, now_millis: i64, collection: &[SavedMakeover]) -> String {
    let taken = |id: &str| collection.iter().any(|m| m.id == id);

    let base = format!("{}-{}", level_id, now_millis);
    if !taken(&base) {
        return base;
    }
    let mut suffix = 2u32;
    loop {
        let candidate = format!("{}-{}", base, suffix);
        if !taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
