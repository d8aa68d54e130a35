//! World-space position in pixels.
//!
//! For bodies with a [`BoxCollider`](super::boxcollider::BoxCollider) the
//! position is the anchor the collider offset is applied to. Tiles and
//! spawn points use the top-left corner convention.
use bevy_ecs::prelude::Component;
use bevy_math::Vec2;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }
}
