//! High-level scene state resources.
//!
//! These resources track the authoritative current scene and any pending
//! transition requested by systems. A transition carries the level document
//! the next scene should work on, so scenes never exchange data through
//! shared storage. See
//! `crate::events::gamestate::observe_gamestate_change_event` for how a
//! transition is applied and hooks are invoked.

use bevy_ecs::prelude::Resource;

use crate::resources::level::LevelDocument;

/// Discrete scenes the game can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStates {
    #[default]
    None,
    MainMenu,
    Editor,
    Playing,
    Quitting,
}

/// A requested scene change and the level handed to the next scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub to: GameStates,
    /// `None` lets the next scene read the storage slot itself.
    pub level: Option<LevelDocument>,
}

impl Transition {
    pub fn to(state: GameStates) -> Self {
        Self {
            to: state,
            level: None,
        }
    }

    pub fn with_level(state: GameStates, level: LevelDocument) -> Self {
        Self {
            to: state,
            level: Some(level),
        }
    }
}

/// Representation of a requested next state.
///
/// Use [`NextGameState::set`] to mark a transition as pending; an observer
/// will later apply it and reset the value to [`NextGameStates::Unchanged`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NextGameStates {
    #[default]
    Unchanged,
    Pending(Transition),
}

/// Authoritative current scene.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameState {
    current: GameStates,
}

impl GameState {
    /// Create a new state initialized to [`GameStates::None`].
    pub fn new() -> Self {
        GameState {
            current: GameStates::None,
        }
    }
    /// Read-only access to the current state.
    pub fn get(&self) -> &GameStates {
        &self.current
    }
    /// Update the current state immediately.
    ///
    /// Prefer requesting transitions via [`NextGameState`] so that scene
    /// teardown and setup run.
    pub fn set(&mut self, state: GameStates) {
        self.current = state;
    }
}

/// Intent to change to a new scene.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub struct NextGameState {
    next: NextGameStates,
}

impl NextGameState {
    /// Create a new value initialized to [`NextGameStates::Unchanged`].
    pub fn new() -> Self {
        NextGameState {
            next: NextGameStates::Unchanged,
        }
    }

    /// Get the current transition request.
    pub fn get(&self) -> &NextGameStates {
        &self.next
    }

    /// Request a transition by marking it as pending. A later request in
    /// the same tick replaces an earlier one.
    pub fn set(&mut self, transition: Transition) {
        self.next = NextGameStates::Pending(transition);
    }

    /// Whether a transition is waiting to be applied.
    pub fn is_pending(&self) -> bool {
        matches!(self.next, NextGameStates::Pending(_))
    }

    /// Take the pending transition, leaving [`NextGameStates::Unchanged`].
    pub fn take(&mut self) -> Option<Transition> {
        match std::mem::take(&mut self.next) {
            NextGameStates::Pending(transition) => Some(transition),
            NextGameStates::Unchanged => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_clears_the_request() {
        let mut next = NextGameState::new();
        assert!(!next.is_pending());
        next.set(Transition::to(GameStates::Editor));
        assert!(next.is_pending());
        assert_eq!(next.take(), Some(Transition::to(GameStates::Editor)));
        assert_eq!(next.get(), &NextGameStates::Unchanged);
        assert_eq!(next.take(), None);
    }

    #[test]
    fn later_request_wins() {
        let mut next = NextGameState::new();
        next.set(Transition::to(GameStates::Editor));
        next.set(Transition::with_level(
            GameStates::Playing,
            LevelDocument::new(2, 2, 32),
        ));
        let t = next.take().unwrap();
        assert_eq!(t.to, GameStates::Playing);
        assert!(t.level.is_some());
    }
}
