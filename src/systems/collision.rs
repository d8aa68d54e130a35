//! Pickup detection and resolution.
//!
//! [`collision_detector`] tests the player's collider against every coin
//! and goal collider and triggers a [`CollisionEvent`] per overlap.
//! [`collision_observer`] applies the game rules for each event.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::boxcollider::BoxCollider;
use crate::components::coin::{COIN_FADE_SECONDS, Coin};
use crate::components::goal::Goal;
use crate::components::mapposition::MapPosition;
use crate::components::outcome::OutcomeOverlay;
use crate::components::player::Player;
use crate::components::rigidbody::RigidBody;
use crate::components::ttl::Ttl;
use crate::events::collision::CollisionEvent;
use crate::resources::progress::{Outcome, Progress};

pub fn collision_detector(
    mut commands: Commands,
    players: Query<(Entity, &MapPosition, &BoxCollider), With<Player>>,
    pickups: Query<(Entity, &MapPosition, &BoxCollider), Or<(With<Coin>, With<Goal>)>>,
) {
    for (player, player_pos, player_collider) in players.iter() {
        for (other, other_pos, other_collider) in pickups.iter() {
            if player_collider.overlaps(player_pos.pos, other_collider, other_pos.pos) {
                commands.trigger(CollisionEvent { a: player, b: other });
            }
        }
    }
}

/// Resolve a player overlap with a coin or the goal.
///
/// Behavior
/// - Nothing happens once the attempt has a terminal outcome or the player
///   is dead.
/// - Coin: counted once. The coin loses its collider and fades out before
///   it is despawned.
/// - Goal: the attempt is won, the player is frozen and the
///   "Level Complete!" overlay appears.
pub fn collision_observer(
    trigger: On<CollisionEvent>,
    mut commands: Commands,
    mut players: Query<(&Player, &mut RigidBody)>,
    mut coins: Query<&mut Coin>,
    goals: Query<(), With<Goal>>,
    progress: Option<ResMut<Progress>>,
) {
    let CollisionEvent { a, b } = *trigger.event();
    let Some(mut progress) = progress else {
        return;
    };
    let Ok((player, mut body)) = players.get_mut(a) else {
        return;
    };
    if progress.is_terminal() || !player.alive {
        return;
    }

    if let Ok(mut coin) = coins.get_mut(b) {
        if !coin.collect() {
            debug!("Coin {:?} already collected", b);
            return;
        }
        progress.award_coin();
        commands
            .entity(b)
            .remove::<BoxCollider>()
            .insert(Ttl::new(COIN_FADE_SECONDS));
    } else if goals.contains(b) && progress.finish(Outcome::Won) {
        info!("Goal reached with score {}", progress.score);
        body.freeze();
        commands.spawn(OutcomeOverlay::level_complete());
    }
}
