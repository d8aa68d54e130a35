//! Player controller.
//!
//! Runs once per tick while an attempt is in progress and applies, in
//! order: the fall-death check, attack expiry, horizontal input, jump,
//! airborne animation and the attack edge. A tick that kills the player
//! does nothing else.
use bevy_ecs::prelude::*;
use log::info;

use crate::components::animation::{AnimKey, Animation};
use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::outcome::OutcomeOverlay;
use crate::components::player::{Facing, Player};
use crate::components::rigidbody::RigidBody;
use crate::components::tilebody::TileBody;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::playfield::Playfield;
use crate::resources::progress::{Outcome, Progress};
use crate::resources::worldtime::WorldTime;

pub fn player_controller(
    mut commands: Commands,
    mut query: Query<(
        Entity,
        &mut Player,
        &MapPosition,
        &mut RigidBody,
        &TileBody,
        &mut Animation,
    )>,
    input: Res<InputState>,
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    playfield: Option<Res<Playfield>>,
    mut progress: ResMut<Progress>,
) {
    let Some(playfield) = playfield else {
        return;
    };
    for (entity, mut player, position, mut body, tile_body, mut anim) in query.iter_mut() {
        if progress.is_terminal() || !player.alive {
            continue;
        }

        if position.pos.y > playfield.pixel_height() {
            info!("Player fell out of the level at y={}", position.pos.y);
            player.alive = false;
            player.attacking = false;
            player.attack_deadline = None;
            body.freeze();
            commands.entity(entity).remove::<BoxCollider>();
            if progress.finish(Outcome::GameOver) {
                commands.spawn(OutcomeOverlay::game_over());
            }
            continue;
        }

        let grounded = tile_body.grounded;

        if player.expire_attack(time.elapsed) && grounded {
            anim.play(AnimKey::Idle);
        }

        if input.left.active {
            body.velocity.x = -config.run_speed;
            player.facing = Facing::Left;
        } else if input.right.active {
            body.velocity.x = config.run_speed;
            player.facing = Facing::Right;
        } else {
            body.velocity.x = 0.0;
        }
        if !player.attacking && grounded {
            if body.velocity.x != 0.0 {
                anim.play(AnimKey::Run);
            } else {
                anim.play(AnimKey::Idle);
            }
        }

        if input.up.active && grounded {
            body.velocity.y = -config.jump_speed;
            anim.play(AnimKey::Jump);
        }

        if !grounded && !player.attacking {
            anim.play(AnimKey::Jump);
        }

        if input.attack.just_pressed && player.start_attack(time.elapsed, config.attack_duration) {
            anim.play(AnimKey::Attack);
        }
    }
}
