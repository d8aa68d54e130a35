//! The controllable actor.
//!
//! [`Player`] holds the state the per-tick controller
//! ([`crate::systems::player::player_controller`]) reads and writes. The
//! attack "timer" is a deadline on the world clock rather than a scheduled
//! callback: the controller compares it with
//! [`WorldTime::elapsed`](crate::resources::worldtime::WorldTime) every tick,
//! and despawning the entity at scene teardown discards it.
use bevy_ecs::prelude::Component;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Player {
    pub alive: bool,
    pub facing: Facing,
    pub attacking: bool,
    /// World time at which the current attack ends.
    pub attack_deadline: Option<f32>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            alive: true,
            facing: Facing::Right,
            attacking: false,
            attack_deadline: None,
        }
    }

    /// Begin an attack at `now` lasting `duration` seconds.
    /// Returns `false` when an attack is already running.
    pub fn start_attack(&mut self, now: f32, duration: f32) -> bool {
        if self.attacking {
            return false;
        }
        self.attacking = true;
        self.attack_deadline = Some(now + duration);
        true
    }

    /// End the attack if its deadline has passed. Returns `true` when the
    /// attack ended on this call.
    pub fn expire_attack(&mut self, now: f32) -> bool {
        match self.attack_deadline {
            Some(deadline) if self.attacking && now >= deadline => {
                self.attacking = false;
                self.attack_deadline = None;
                true
            }
            _ => false,
        }
    }
}
