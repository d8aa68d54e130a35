//! Host input events.
//!
//! The host (window, browser, test, replay script) pushes [`InputEvent`]s
//! into the `Messages<InputEvent>` queue as they happen. The queue is drained
//! once per tick by [`crate::systems::input::update_input_state`], which
//! folds the events into the [`InputState`](crate::resources::input::InputState)
//! resource read by the scene systems.

use bevy_ecs::message::Message;

use crate::resources::level::TileCode;

/// Logical keys the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    Left,
    Right,
    Up,
    Attack,
    /// Leave the current scene (escape).
    Back,
    /// Editor: switch between the selected tile and the eraser.
    ToggleEraser,
    /// Editor: save shortcut.
    Save,
}

/// On-screen buttons. Hit-testing belongs to the host; it only reports which
/// button was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiButton {
    /// Main menu: play the saved level.
    Play,
    /// Main menu: open the level editor.
    LevelEditor,
    /// Editor palette entry.
    SelectTile(TileCode),
    LoadLevel,
    TestLevel,
    /// Outcome overlay after a game over.
    Restart,
    /// Outcome overlay after completing the level.
    Proceed,
}

/// One raw input occurrence.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Action { action: InputAction, pressed: bool },
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    Button(UiButton),
}

impl InputEvent {
    pub fn press(action: InputAction) -> Self {
        InputEvent::Action {
            action,
            pressed: true,
        }
    }

    pub fn release(action: InputAction) -> Self {
        InputEvent::Action {
            action,
            pressed: false,
        }
    }
}
