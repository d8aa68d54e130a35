//! Collision event type.
//!
//! The collision detector emits [`CollisionEvent`] whenever the player's
//! collider overlaps a coin or the goal. The observer in
//! [`crate::systems::collision`] turns those overlaps into pickups and the
//! level-complete outcome.
use bevy_ecs::prelude::*;

/// Event fired when two entities with BoxCollider overlap.
///
/// `a` is the player, `b` the entity it touched.
#[derive(Event, Debug, Clone, Copy)]
pub struct CollisionEvent {
    pub a: Entity,
    pub b: Entity,
}
