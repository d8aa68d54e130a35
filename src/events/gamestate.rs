//! Scene transition event and observer.
//!
//! Systems request a change of scene by setting [`NextGameState`].
//! Emitting a [`GameStateChangedEvent`] then triggers the observer in this
//! module, which applies the transition to [`GameState`], tears the old
//! scene down and builds the new one with the level the transition carries.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::game;
use crate::resources::gamestate::{GameState, GameStates, NextGameState, Transition};

/// Event used to indicate that a pending scene transition should be
/// applied.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Observer that applies a pending scene transition.
///
/// Contract
/// - Takes the pending transition out of [`NextGameState`], leaving it empty.
/// - If pending, copies the new value into [`GameState`], then queues the
///   exit hook of the old scene followed by the enter hook of the new one.
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    mut commands: Commands,
    mut next_game_state: ResMut<NextGameState>,
    mut game_state: ResMut<GameState>,
) {
    let Some(transition) = next_game_state.take() else {
        debug!("No state change pending.");
        return;
    };
    let old_state = *game_state.get();
    info!("Transitioning from {:?} to {:?}", old_state, transition.to);
    game_state.set(transition.to);
    commands.queue(move |world: &mut World| {
        on_state_exit(world, old_state);
        on_state_enter(world, transition);
    });
}

/// Internal: build the scene for the given state.
fn on_state_enter(world: &mut World, transition: Transition) {
    match transition.to {
        GameStates::None => debug!("Entered None state"),
        GameStates::MainMenu => game::enter_menu(world),
        GameStates::Editor => game::enter_editor(world, transition.level),
        GameStates::Playing => game::enter_play(world, transition.level),
        GameStates::Quitting => game::quit_game(world),
    }
}

/// Internal: tear down the scene of the given state.
fn on_state_exit(world: &mut World, state: GameStates) {
    debug!("Exited {:?} state", state);
    game::clean_scene(world);
}
