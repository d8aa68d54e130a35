//! Marker for bodies that collide with the solid tiles of the playfield.
use bevy_ecs::prelude::Component;

/// Collision facts the tile step resolved for this body on the last tick.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileBody {
    /// Resting on a solid tile.
    pub grounded: bool,
}
