//! Session domain: tests for the reducer, the session driver and the plugin.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use super::driver::ProgressMark;
use super::{Effect, GameAction, GameState, Session, SessionPlugin, TransitionContext, reduce};
use crate::content::{ContentRegistry, ItemCategory, LevelDef, Offset, builtin_content};
use crate::core::Screen;
use crate::progress::{GameProgress, MemoryBackend, ProgressStore};
use crate::rules::calculate_stars;

const NOW: i64 = 1_700_000_000_000;

fn catalog() -> ContentRegistry {
    builtin_content().expect("embedded catalog parses")
}

fn ctx(defaults: &GameProgress) -> TransitionContext<'_> {
    TransitionContext {
        now_millis: NOW,
        max_level_id: 10,
        starting_category: ItemCategory::Lips,
        defaults,
    }
}

fn level(registry: &ContentRegistry, id: u32) -> LevelDef {
    registry.find_level(id).expect("level exists").clone()
}

fn apply(registry: &ContentRegistry, id: &str) -> GameAction {
    let item = registry.find_item(id).expect("item exists").clone();
    GameAction::ApplyItem {
        position: item.offset,
        item,
    }
}

/// Run actions through the reducer, collecting every effect.
fn run(state: GameState, actions: Vec<GameAction>) -> (GameState, Vec<Effect>) {
    let defaults = GameProgress::default();
    let ctx = ctx(&defaults);
    let mut effects = Vec::new();
    let state = actions.into_iter().fold(state, |state, action| {
        let transition = reduce(state, action, &ctx);
        effects.extend(transition.effects);
        transition.state
    });
    (state, effects)
}

fn loaded_state() -> GameState {
    run(
        GameState::default(),
        vec![GameAction::LoadProgress(GameProgress::default())],
    )
    .0
}

fn session() -> Session {
    Session::new(ProgressStore::new(MemoryBackend::default()), ItemCategory::Lips)
}

// -----------------------------------------------------------------------------
// Reducer: navigation and makeover editing
// -----------------------------------------------------------------------------

#[test]
fn test_initial_state() {
    let state = GameState::default();
    assert_eq!(state.screen, Screen::Menu);
    assert!(state.current_level.is_none());
    assert!(state.applied_items.is_empty());
    assert!(state.selected_category.is_none());
    assert!(state.is_loading);
}

#[test]
fn test_load_progress_lifts_loading_gate() {
    let mut progress = GameProgress::default();
    progress.unlock(2);
    let (state, effects) = run(
        GameState::default(),
        vec![GameAction::LoadProgress(progress.clone())],
    );
    assert!(!state.is_loading);
    assert_eq!(state.progress, progress);
    assert!(effects.is_empty());

    let (state, _) = run(state, vec![GameAction::SetLoading(true)]);
    assert!(state.is_loading);
}

#[test]
fn test_set_screen_is_unguarded() {
    let (state, effects) = run(loaded_state(), vec![GameAction::SetScreen(Screen::Game)]);
    assert_eq!(state.screen, Screen::Game);
    assert!(state.current_level.is_none());
    assert!(effects.is_empty());

    for screen in [Screen::LevelSelect, Screen::Collection, Screen::Menu] {
        let (state, _) = run(state.clone(), vec![GameAction::SetScreen(screen)]);
        assert_eq!(state.screen, screen);
    }
}

#[test]
fn test_select_level_starts_clean_makeover() {
    let registry = catalog();
    let (state, effects) = run(
        loaded_state(),
        vec![
            GameAction::SelectLevel(level(&registry, 1)),
            apply(&registry, "lips-1"),
            GameAction::SelectCategory(Some(ItemCategory::Wings)),
            GameAction::SetScreen(Screen::LevelSelect),
            GameAction::SelectLevel(level(&registry, 2)),
        ],
    );

    assert_eq!(state.screen, Screen::Game);
    assert_eq!(state.current_level.as_ref().map(|l| l.id), Some(2));
    assert!(state.applied_items.is_empty());
    assert_eq!(state.selected_category, Some(ItemCategory::Lips));
    assert!(effects.is_empty());
}

#[test]
fn test_apply_item_appends_with_defaults() {
    let registry = catalog();
    let wand = registry.find_item("accessories-5").unwrap().clone();
    let (state, effects) = run(
        loaded_state(),
        vec![
            GameAction::SelectLevel(level(&registry, 1)),
            GameAction::SelectCategory(Some(ItemCategory::Lips)),
            GameAction::ApplyItem {
                item: wand.clone(),
                position: Offset::new(10.0, -4.0),
            },
            GameAction::ApplyItem {
                item: wand.clone(),
                position: wand.offset,
            },
        ],
    );

    // No category check and no de-duplication
    assert_eq!(state.applied_items.len(), 2);
    let first = &state.applied_items[0];
    assert_eq!(first.position, Offset::new(10.0, -4.0));
    assert_eq!(first.rotation, 0.0);
    assert_eq!(first.scale, 1.0);
    assert_eq!(state.last_applied().map(|a| a.position), Some(wand.offset));
    assert!(effects.is_empty());
}

#[test]
fn test_undo_is_lifo_inverse_of_apply() {
    let registry = catalog();
    let (before, _) = run(
        loaded_state(),
        vec![
            GameAction::SelectLevel(level(&registry, 1)),
            apply(&registry, "hair-1"),
        ],
    );

    let ids = ["lips-2", "eyes-3", "lips-2", "wings-6"];
    let mut actions: Vec<_> = ids.iter().map(|id| apply(&registry, id)).collect();
    let (middle, _) = run(before.clone(), actions.clone());
    assert_eq!(
        middle.applied_item_ids(),
        vec!["hair-1", "lips-2", "eyes-3", "lips-2", "wings-6"]
    );

    let (after_one_undo, _) = run(middle, vec![GameAction::RemoveLastItem]);
    assert_eq!(
        after_one_undo.last_applied().map(|a| a.item.id.as_str()),
        Some("lips-2")
    );

    actions.extend(std::iter::repeat_n(GameAction::RemoveLastItem, ids.len()));
    let (after, _) = run(before.clone(), actions);
    assert_eq!(after, before);
}

#[test]
fn test_undo_on_empty_makeover_is_noop() {
    let registry = catalog();
    let (state, _) = run(
        loaded_state(),
        vec![GameAction::SelectLevel(level(&registry, 1))],
    );
    let (after, effects) = run(
        state.clone(),
        vec![GameAction::RemoveLastItem, GameAction::RemoveLastItem],
    );
    assert_eq!(after, state);
    assert!(effects.is_empty());
}

#[test]
fn test_reset_makeover_keeps_screen_and_category() {
    let registry = catalog();
    let (state, _) = run(
        loaded_state(),
        vec![
            GameAction::SelectLevel(level(&registry, 1)),
            GameAction::SelectCategory(Some(ItemCategory::Hair)),
            apply(&registry, "hair-1"),
            apply(&registry, "eyes-1"),
            GameAction::ResetMakeover,
        ],
    );
    assert!(state.applied_items.is_empty());
    assert_eq!(state.screen, Screen::Game);
    assert_eq!(state.selected_category, Some(ItemCategory::Hair));
}

#[test]
fn test_select_category_does_not_touch_items() {
    let registry = catalog();
    let (state, _) = run(
        loaded_state(),
        vec![
            GameAction::SelectLevel(level(&registry, 1)),
            apply(&registry, "cheeks-1"),
            GameAction::SelectCategory(None),
        ],
    );
    assert_eq!(state.selected_category, None);
    assert_eq!(state.applied_items.len(), 1);
}

// -----------------------------------------------------------------------------
// Reducer: completion and persisted fields
// -----------------------------------------------------------------------------

#[test]
fn test_complete_without_level_is_noop() {
    let state = loaded_state();
    let (after, effects) = run(state.clone(), vec![GameAction::CompleteLevel { stars: 3 }]);
    assert_eq!(after, state);
    assert!(effects.is_empty());
}

#[test]
fn test_complete_level_records_makeover() {
    let registry = catalog();
    let (state, effects) = run(
        loaded_state(),
        vec![
            GameAction::SelectLevel(level(&registry, 3)),
            apply(&registry, "eyes-2"),
            apply(&registry, "lips-5"),
            GameAction::CompleteLevel { stars: 1 },
        ],
    );

    assert_eq!(effects, vec![Effect::SaveProgress]);
    assert_eq!(state.screen, Screen::Result);

    let progress = &state.progress;
    assert_eq!(progress.collection.len(), 1);
    let makeover = &progress.collection[0];
    assert_eq!(makeover.id, format!("3-{}", NOW));
    assert_eq!(makeover.level_id, 3);
    assert_eq!(makeover.character_id, "unicorn-princess");
    assert_eq!(makeover.applied_items, vec!["eyes-2", "lips-5"]);
    assert_eq!(makeover.stars, 1);
    assert_eq!(makeover.timestamp, NOW);
    assert_eq!(progress.total_stars, 1);
    assert_eq!(progress.current_level, 3);
    assert_eq!(progress.unlocked_levels, vec![1, 4]);
}

#[test]
fn test_completing_last_level_unlocks_nothing() {
    let registry = catalog();
    let (state, effects) = run(
        loaded_state(),
        vec![
            GameAction::SelectLevel(level(&registry, 10)),
            apply(&registry, "wings-1"),
            GameAction::CompleteLevel { stars: 1 },
        ],
    );
    assert_eq!(effects, vec![Effect::SaveProgress]);
    assert_eq!(state.progress.unlocked_levels, vec![1]);
    assert_eq!(state.progress.collection.len(), 1);
    assert_eq!(state.screen, Screen::Result);
}

#[test]
fn test_repeat_completions_append_and_accumulate() {
    let registry = catalog();
    let mut actions = vec![GameAction::SelectLevel(level(&registry, 1))];
    for stars in [1u8, 3, 0, 2, 7] {
        actions.push(GameAction::CompleteLevel { stars });
        actions.push(GameAction::SelectLevel(level(&registry, 1)));
    }
    let (state, _) = run(loaded_state(), actions);

    let progress = &state.progress;
    assert_eq!(progress.collection.len(), 5);
    // Out-of-range scores are clamped to the maximum
    assert_eq!(progress.collection[4].stars, 3);
    let sum: u32 = progress.collection.iter().map(|m| u32::from(m.stars)).sum();
    assert_eq!(progress.total_stars, sum);
    assert_eq!(progress.total_stars, 9);
    assert_eq!(progress.unlocked_levels, vec![1, 2]);

    // Same clock reading every time, ids still unique
    let ids: Vec<_> = progress.collection.iter().map(|m| m.id.as_str()).collect();
    let expected_first = format!("1-{}", NOW);
    assert_eq!(ids[0], expected_first);
    assert_eq!(ids[1], format!("{}-2", expected_first));
    assert_eq!(ids[4], format!("{}-5", expected_first));
}

#[test]
fn test_setting_actions_request_save() {
    let (state, effects) = run(
        loaded_state(),
        vec![
            GameAction::ToggleMusic,
            GameAction::ToggleSfx,
            GameAction::ToggleSfx,
            GameAction::SetMusicVolume(2.0),
            GameAction::SetSfxVolume(0.3),
        ],
    );
    assert_eq!(effects, vec![Effect::SaveProgress; 5]);
    let settings = &state.progress.settings;
    assert!(!settings.music_enabled);
    assert!(settings.sfx_enabled);
    assert_eq!(settings.music_volume, 1.0);
    assert_eq!(settings.sfx_volume, 0.3);
    assert_eq!(state.screen, Screen::Menu);
}

#[test]
fn test_reset_progress_returns_to_menu_with_defaults() {
    let registry = catalog();
    let (state, effects) = run(
        loaded_state(),
        vec![
            GameAction::SelectLevel(level(&registry, 1)),
            apply(&registry, "lips-1"),
            GameAction::CompleteLevel { stars: 1 },
            GameAction::ResetProgress,
        ],
    );
    assert_eq!(effects, vec![Effect::SaveProgress, Effect::ClearSavedProgress]);
    assert_eq!(state.progress, GameProgress::default());
    assert_eq!(state.screen, Screen::Menu);
    assert!(state.current_level.is_none());
    assert!(state.applied_items.is_empty());
    assert!(!state.is_loading);
}

// -----------------------------------------------------------------------------
// Session driver
// -----------------------------------------------------------------------------

#[test]
fn test_full_makeover_scenario() {
    let registry = catalog();
    let mut session = session();
    session.load(&registry);
    assert!(!session.state().is_loading);

    assert!(session.select_level(1, &registry));
    for category in ItemCategory::ALL {
        assert!(session.apply_item(&format!("{}-1", category.as_str()), &registry));
    }
    assert_eq!(calculate_stars(&session.state().applied_items), 3);

    let stars = session.complete_makeover(&registry);
    assert_eq!(stars, 3);

    let state = session.state();
    let progress = &state.progress;
    assert_eq!(progress.collection.len(), 1);
    assert_eq!(progress.latest_makeover().map(|m| m.stars), Some(3));
    assert_eq!(progress.total_stars, 3);
    assert!(progress.unlocked_levels.contains(&2));
    assert_eq!(state.screen, Screen::Result);

    // Persisted inline with the completion
    assert_eq!(session.store().load(), *progress);
}

#[test]
fn test_two_category_makeover_earns_one_star() {
    let registry = catalog();
    let mut session = session();
    session.load(&registry);
    session.select_level(1, &registry);
    session.apply_item("lips-1", &registry);
    session.apply_item("lips-2", &registry);
    session.apply_item("eyes-1", &registry);
    assert_eq!(session.complete_makeover(&registry), 1);
}

#[test]
fn test_select_level_respects_unlock_policy() {
    let registry = catalog();
    let mut session = session();
    session.load(&registry);

    assert!(!session.select_level(3, &registry));
    assert!(!session.select_level(42, &registry));
    assert_eq!(session.state().screen, Screen::Menu);

    // Level 2 only needs level 1 to be unlocked
    assert!(session.select_level(2, &registry));
    assert_eq!(session.state().current_level.as_ref().map(|l| l.id), Some(2));
}

#[test]
fn test_apply_item_lookups() {
    let registry = catalog();
    let mut session = session();
    session.load(&registry);
    session.select_level(1, &registry);

    assert!(!session.apply_item("lips-99", &registry));
    assert!(session.apply_item_at("hair-2", Offset::new(5.0, 5.0), &registry));
    assert!(session.apply_item("hair-3", &registry));

    let items = &session.state().applied_items;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].position, Offset::new(5.0, 5.0));
    assert_eq!(items[1].position, Offset::new(0.0, -96.0));
}

#[test]
fn test_transient_edits_are_not_persisted() {
    let registry = catalog();
    let mut session = session();
    session.load(&registry);
    session.select_level(1, &registry);
    session.apply_item("lips-1", &registry);
    session.dispatch(GameAction::RemoveLastItem, &registry);
    assert!(!session.store().has_saved_progress());

    session.dispatch(GameAction::ToggleMusic, &registry);
    assert!(session.store().has_saved_progress());
    assert!(!session.store().load().settings.music_enabled);
}

#[test]
fn test_progress_survives_a_new_session() {
    let registry = catalog();
    let mut first = session();
    first.load(&registry);
    first.select_level(1, &registry);
    first.apply_item("wings-2", &registry);
    first.complete_makeover(&registry);
    first.dispatch(GameAction::ToggleSfx, &registry);
    let saved = first.state().progress.clone();

    // A restart reads the same blob back into a fresh state
    let mut store = ProgressStore::new(MemoryBackend::default());
    store.save(&first.store().load());
    let mut second = Session::new(store, ItemCategory::Lips);
    assert_eq!(second.state().progress, GameProgress::default());
    second.load(&registry);
    assert_eq!(second.state().progress, saved);
    assert!(!second.state().progress.settings.sfx_enabled);
}

#[test]
fn test_reset_progress_clears_storage() {
    let registry = catalog();
    let mut session = session();
    session.load(&registry);
    session.select_level(1, &registry);
    session.complete_makeover(&registry);
    assert!(session.store().has_saved_progress());

    session.dispatch(GameAction::ResetProgress, &registry);
    assert!(!session.store().has_saved_progress());
    assert_eq!(session.state().progress, GameProgress::default());
}

#[test]
fn test_level_overview() {
    let registry = catalog();
    let mut session = session();
    session.load(&registry);
    session.select_level(1, &registry);
    for id in ["lips-1", "eyes-1", "cheeks-1", "hair-1"] {
        session.apply_item(id, &registry);
    }
    session.complete_makeover(&registry);

    let overview = session.level_overview(&registry);
    assert_eq!(overview.len(), 10);
    assert_eq!(overview[0].name, "Spring Garden");
    assert_eq!(overview[0].character_name, "Luna the Forest Fairy");
    assert_eq!(overview[0].best_stars, 2);
    assert!(overview[0].unlocked);
    assert!(overview[1].unlocked);
    assert!(overview[2].unlocked);
    assert!(!overview[3].unlocked);
    assert_eq!(overview[1].best_stars, 0);
}

#[test]
fn test_only_completing_a_level_reports_completions() {
    let registry = catalog();
    let (played, _) = run(
        loaded_state(),
        vec![
            GameAction::SelectLevel(level(&registry, 1)),
            apply(&registry, "lips-1"),
            GameAction::CompleteLevel { stars: 1 },
        ],
    );
    let saved = played.progress;

    // A startup load of a saved collection is not a completion
    let load = GameAction::LoadProgress(saved.clone());
    let mark = ProgressMark::before(&load, &GameProgress::default());
    assert!(mark.completion_events(&saved).is_empty());

    let complete = GameAction::CompleteLevel { stars: 1 };
    let mark = ProgressMark::before(&complete, &GameProgress::default());
    assert_eq!(
        mark.completion_events(&saved),
        vec![
            "Level 1 completed with 1 stars (total 1)".to_string(),
            "Level 2 unlocked".to_string(),
        ]
    );
}

// -----------------------------------------------------------------------------
// Plugin wiring
// -----------------------------------------------------------------------------

#[test]
fn test_plugin_processes_actions_and_syncs_screen() {
    let registry = catalog();
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .init_state::<Screen>()
        .insert_resource(registry.clone())
        .insert_resource(session())
        .add_plugins(SessionPlugin);

    app.update();
    assert!(!app.world().resource::<Session>().state().is_loading);

    app.world_mut()
        .write_message(GameAction::SelectLevel(level(&registry, 1)));
    app.world_mut().write_message(apply(&registry, "eyes-4"));
    app.update();

    let state = app.world().resource::<Session>().state();
    assert_eq!(state.screen, Screen::Game);
    assert_eq!(state.applied_item_ids(), vec!["eyes-4"]);

    app.update();
    assert_eq!(*app.world().resource::<State<Screen>>().get(), Screen::Game);
}
