//! Per-frame input resource.
//!
//! Captures the logical input state the scenes care about: held and edge
//! state for each [`InputAction`], the pointer, and buttons activated this
//! tick. Filled by [`crate::systems::input::update_input_state`].
use bevy_ecs::prelude::*;
use smallvec::SmallVec;

use crate::events::input::{InputAction, UiButton};

/// Boolean key state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoolState {
    /// Whether the key is currently held.
    pub active: bool,
    /// Whether the key was pressed this tick.
    pub just_pressed: bool,
    /// Whether the key was released this tick.
    pub just_released: bool,
}

impl BoolState {
    fn press(&mut self) {
        if !self.active {
            self.just_pressed = true;
        }
        self.active = true;
    }

    fn release(&mut self) {
        if self.active {
            self.just_released = true;
        }
        self.active = false;
    }

    fn clear_edges(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }
}

/// Pointer button state and the positions it swept while held this tick.
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    pub down: bool,
    /// Screen positions visited while the pointer was down this tick,
    /// in arrival order.
    pub strokes: SmallVec<[(f32, f32); 8]>,
}

/// Resource capturing the per-tick input relevant to gameplay and editing.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    pub left: BoolState,
    pub right: BoolState,
    pub up: BoolState,
    pub attack: BoolState,
    pub back: BoolState,
    pub toggle_eraser: BoolState,
    pub save: BoolState,
    pub pointer: PointerState,
    /// Buttons activated this tick, in arrival order.
    pub buttons: SmallVec<[UiButton; 4]>,
}

impl InputState {
    /// Mutable key state for `action`.
    pub fn action_mut(&mut self, action: InputAction) -> &mut BoolState {
        match action {
            InputAction::Left => &mut self.left,
            InputAction::Right => &mut self.right,
            InputAction::Up => &mut self.up,
            InputAction::Attack => &mut self.attack,
            InputAction::Back => &mut self.back,
            InputAction::ToggleEraser => &mut self.toggle_eraser,
            InputAction::Save => &mut self.save,
        }
    }

    /// Apply a key press or release.
    pub fn set_action(&mut self, action: InputAction, pressed: bool) {
        let state = self.action_mut(action);
        if pressed {
            state.press();
        } else {
            state.release();
        }
    }

    /// Forget edges and per-tick lists; held state carries over.
    pub fn begin_tick(&mut self) {
        for action in [
            InputAction::Left,
            InputAction::Right,
            InputAction::Up,
            InputAction::Attack,
            InputAction::Back,
            InputAction::ToggleEraser,
            InputAction::Save,
        ] {
            self.action_mut(action).clear_edges();
        }
        self.pointer.strokes.clear();
        self.buttons.clear();
    }

    /// Whether `button` was activated this tick.
    pub fn clicked(&self, button: UiButton) -> bool {
        self.buttons.contains(&button)
    }
}
