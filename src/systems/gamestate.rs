use crate::events::gamestate::GameStateChangedEvent;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use bevy_ecs::prelude::*;

/// Emit [`GameStateChangedEvent`] when a system requested a scene change.
pub fn check_pending_state(mut commands: Commands, next_state: Res<NextGameState>) {
    if next_state.is_pending() {
        commands.trigger(GameStateChangedEvent {});
    }
}

pub fn state_in_menu(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::MainMenu)
}

pub fn state_is_editing(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::Editor)
}

pub fn state_is_playing(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::Playing)
}
