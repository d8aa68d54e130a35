//! Animation playback system.
use bevy_ecs::prelude::*;

use crate::components::animation::Animation;
use crate::resources::worldtime::WorldTime;

/// Advance every [`Animation`] by the tick delta. Looping tracks wrap,
/// the others hold their last frame.
pub fn animation(time: Res<WorldTime>, mut query: Query<&mut Animation>) {
    for mut anim in query.iter_mut() {
        let key = anim.key;
        anim.elapsed_time += time.delta;
        let frames_played = (anim.elapsed_time * key.fps()) as usize;
        anim.frame_index = if key.looped() {
            frames_played % key.frames()
        } else {
            frames_played.min(key.frames() - 1)
        };
    }
}
