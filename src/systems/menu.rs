//! Main menu scene system.
use bevy_ecs::prelude::*;

use crate::events::input::UiButton;
use crate::resources::gamestate::{GameStates, NextGameState, Transition};
use crate::resources::input::InputState;

/// `Play` starts the saved level, `Level Editor` opens the editor and the
/// back key quits.
pub fn main_menu_system(input: Res<InputState>, mut next_state: ResMut<NextGameState>) {
    if input.clicked(UiButton::Play) {
        next_state.set(Transition::to(GameStates::Playing));
    } else if input.clicked(UiButton::LevelEditor) {
        next_state.set(Transition::to(GameStates::Editor));
    } else if input.back.just_pressed {
        next_state.set(Transition::to(GameStates::Quitting));
    }
}
