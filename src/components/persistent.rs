//! Marker for entities that outlive scene changes.
//!
//! Scene teardown ([`crate::game::clean_scene`]) never despawns an entity
//! carrying [`Persistent`]. The global observers are spawned with it.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Debug)]
pub struct Persistent;
