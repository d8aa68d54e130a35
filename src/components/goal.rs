use bevy_ecs::prelude::Component;

/// Level exit. Touching it completes the level.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Goal;
