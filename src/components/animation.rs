//! Sprite animation playback state.
//!
//! Systems pick a track with [`Animation::play`]; the
//! [`animation`](crate::systems::animation::animation) system advances the
//! frame index from the track's frame count and rate.
use bevy_ecs::prelude::Component;

/// Animation tracks of the player sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimKey {
    #[default]
    Idle,
    Run,
    Jump,
    Attack,
}

impl AnimKey {
    /// Number of frames in the track.
    pub fn frames(self) -> usize {
        match self {
            AnimKey::Idle => 2,
            AnimKey::Run => 3,
            AnimKey::Jump | AnimKey::Attack => 1,
        }
    }

    /// Frames per second.
    pub fn fps(self) -> f32 {
        match self {
            AnimKey::Idle => 4.0,
            AnimKey::Run => 10.0,
            AnimKey::Jump | AnimKey::Attack => 1.0,
        }
    }

    pub fn looped(self) -> bool {
        matches!(self, AnimKey::Idle | AnimKey::Run)
    }
}

#[derive(Debug, Clone, Component, Default, PartialEq)]
pub struct Animation {
    pub key: AnimKey,
    pub frame_index: usize,
    pub elapsed_time: f32,
}

impl Animation {
    pub fn new(key: AnimKey) -> Self {
        Self {
            key,
            frame_index: 0,
            elapsed_time: 0.0,
        }
    }

    /// Switch to `key`. Playing the track already running does nothing.
    pub fn play(&mut self, key: AnimKey) {
        if self.key != key {
            *self = Self::new(key);
        }
    }
}
