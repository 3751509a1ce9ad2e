//! Session domain: systems wiring the session into the app schedule.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::content::ContentRegistry;
use crate::core::Screen;
use crate::session::actions::GameAction;
use crate::session::driver::Session;

pub(crate) fn load_saved_progress(mut session: ResMut<Session>, registry: Res<ContentRegistry>) {
    session.load(&registry);
}

pub(crate) fn process_game_actions(
    mut actions: MessageReader<GameAction>,
    mut session: ResMut<Session>,
    registry: Res<ContentRegistry>,
) {
    for action in actions.read() {
        session.dispatch(action.clone(), &registry);
    }
}

/// Mirror the session's screen into the app-level `Screen` state
pub(crate) fn sync_screen_state(
    session: Res<Session>,
    screen: Res<State<Screen>>,
    mut next_screen: ResMut<NextState<Screen>>,
) {
    let target = session.state().screen;
    if *screen.get() != target {
        debug!("Screen {:?} -> {:?}", screen.get(), target);
        next_screen.set(target);
    }
}
