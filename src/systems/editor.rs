//! Level editor scene system.
//!
//! Applies this tick's input to the [`LevelEditor`]: palette and toolbar
//! buttons first, then the eraser toggle, painting along the pointer
//! strokes, the save shortcut and finally the back key.
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::events::input::UiButton;
use crate::resources::editor::LevelEditor;
use crate::resources::gamestate::{GameStates, NextGameState, Transition};
use crate::resources::input::InputState;
use crate::resources::levelstore::LevelStorage;

pub fn editor_system(
    input: Res<InputState>,
    editor: Option<ResMut<LevelEditor>>,
    mut storage: ResMut<LevelStorage>,
    mut next_state: ResMut<NextGameState>,
) {
    let Some(mut editor) = editor else {
        return;
    };

    for button in input.buttons.iter() {
        match *button {
            UiButton::SelectTile(tile) => {
                debug!("Selected tile {}", tile);
                editor.select_tile(tile);
            }
            UiButton::LoadLevel => {
                // Failures are reported through the editor notice.
                let _ = editor.load(&storage);
            }
            UiButton::TestLevel => {
                if let Ok(document) = editor.hand_to_runtime(&mut storage) {
                    info!("Testing level from the editor");
                    next_state.set(Transition::with_level(GameStates::Playing, document));
                    return;
                }
            }
            _ => {}
        }
    }

    if input.toggle_eraser.just_pressed {
        editor.toggle_eraser();
        debug!("Eraser {}", if editor.eraser { "on" } else { "off" });
    }

    for &(x, y) in input.pointer.strokes.iter() {
        editor.paint_at(x, y);
    }

    if input.save.just_pressed {
        let _ = editor.save(&mut storage);
    }

    if input.back.just_pressed {
        next_state.set(Transition::to(GameStates::MainMenu));
    }
}
