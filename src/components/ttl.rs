//! Time-to-live component for automatic entity despawning.
//!
//! Collected coins keep playing their fade-out for a short while; a [`Ttl`]
//! counts that time down and [`crate::systems::ttl::ttl_system`] despawns
//! the entity when it reaches zero.

use bevy_ecs::prelude::Component;

/// Time-to-live component that automatically despawns entities after a duration.
#[derive(Component, Debug, Clone, Copy)]
pub struct Ttl {
    /// Remaining time in seconds before despawn.
    pub remaining: f32,
}

impl Ttl {
    /// Create a new Ttl with the given duration in seconds.
    pub fn new(seconds: f32) -> Self {
        Ttl { remaining: seconds }
    }
}
