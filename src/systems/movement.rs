//! Body integration.
//!
//! Applies the enabled forces of each [`RigidBody`] to its velocity, then
//! moves the body. Bodies carrying a [`TileBody`] and a collider are moved
//! through [`Playfield::move_body`] so they collide with solid tiles; the
//! rest move freely.
use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::tilebody::TileBody;
use crate::resources::playfield::Playfield;
use crate::resources::worldtime::WorldTime;

pub fn movement(
    mut query: Query<(
        &mut MapPosition,
        &mut RigidBody,
        Option<&BoxCollider>,
        Option<&mut TileBody>,
    )>,
    time: Res<WorldTime>,
    playfield: Option<Res<Playfield>>,
) {
    let dt = time.delta;
    for (mut position, mut rigidbody, collider, tile_body) in query.iter_mut() {
        if rigidbody.frozen {
            continue;
        }
        let acceleration = rigidbody.total_acceleration();
        rigidbody.velocity += acceleration * dt;
        let delta = rigidbody.velocity * dt;

        match (playfield.as_deref(), collider, tile_body) {
            (Some(field), Some(collider), Some(mut tile_body)) => {
                let mut pos = position.pos;
                let mut velocity = rigidbody.velocity;
                *tile_body = field.move_body(&mut pos, &mut velocity, collider, delta);
                position.pos = pos;
                rigidbody.velocity = velocity;
            }
            _ => position.pos += delta,
        }
    }
}
