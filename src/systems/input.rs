//! Input systems.
//!
//! [`update_input_state`] drains the host's [`InputEvent`] queue once per
//! tick and writes the result into [`InputState`].
use bevy_ecs::prelude::*;
use log::trace;

use crate::events::input::InputEvent;
use crate::resources::input::InputState;

/// Fold this tick's queued input events into the `InputState` resource.
pub fn update_input_state(mut events: ResMut<Messages<InputEvent>>, mut input: ResMut<InputState>) {
    input.begin_tick();
    for event in events.drain() {
        trace!("input {:?}", event);
        match event {
            InputEvent::Action { action, pressed } => input.set_action(action, pressed),
            InputEvent::PointerDown { x, y } => {
                input.pointer.down = true;
                input.pointer.strokes.push((x, y));
            }
            InputEvent::PointerMove { x, y } => {
                if input.pointer.down {
                    input.pointer.strokes.push((x, y));
                }
            }
            InputEvent::PointerUp { .. } => input.pointer.down = false,
            InputEvent::Button(button) => input.buttons.push(button),
        }
    }
}
