//! End-of-attempt overlay.
use bevy_ecs::prelude::Component;

use crate::events::input::UiButton;

/// Message and the single action offered when an attempt ends.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct OutcomeOverlay {
    pub message: String,
    pub action: UiButton,
}

impl OutcomeOverlay {
    pub fn game_over() -> Self {
        Self {
            message: "Game Over".to_string(),
            action: UiButton::Restart,
        }
    }

    pub fn level_complete() -> Self {
        Self {
            message: "Level Complete!".to_string(),
            action: UiButton::Proceed,
        }
    }
}
