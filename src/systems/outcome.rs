//! Runtime scene exits.
//!
//! Handles the single action of the outcome overlay and the back key while
//! playing. Both lead out of the current attempt with the played document.
use bevy_ecs::prelude::*;
use log::info;

use crate::components::outcome::OutcomeOverlay;
use crate::events::input::UiButton;
use crate::resources::gamestate::{GameStates, NextGameState, Transition};
use crate::resources::input::InputState;
use crate::resources::level::LevelDocument;
use crate::resources::playfield::Playfield;

fn carrying(state: GameStates, document: Option<LevelDocument>) -> Transition {
    match document {
        Some(document) => Transition::with_level(state, document),
        None => Transition::to(state),
    }
}

pub fn outcome_system(
    input: Res<InputState>,
    overlays: Query<&OutcomeOverlay>,
    playfield: Option<Res<Playfield>>,
    mut next_state: ResMut<NextGameState>,
) {
    let document = playfield.as_ref().map(|field| field.source.clone());

    for overlay in overlays.iter() {
        if !input.clicked(overlay.action) {
            continue;
        }
        match overlay.action {
            UiButton::Restart => {
                info!("Restarting level");
                next_state.set(carrying(GameStates::Playing, document));
            }
            UiButton::Proceed => {
                info!("Returning to the editor");
                next_state.set(carrying(GameStates::Editor, document));
            }
            _ => continue,
        }
        return;
    }

    if input.back.just_pressed {
        next_state.set(carrying(GameStates::Editor, document));
    }
}
