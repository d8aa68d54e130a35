//! Kinematic body with named acceleration forces.
//!
//! The [`RigidBody`] component stores velocity and named acceleration
//! forces (gravity is one of them). The `frozen` flag stops all movement,
//! which is how the terminal outcomes "freeze" the player.

use bevy_ecs::prelude::Component;
use bevy_math::Vec2;
use rustc_hash::FxHashMap;

/// Name of the force the runtime installs on falling bodies.
pub const GRAVITY: &str = "gravity";

/// Kinematic body storing velocity and named acceleration forces.
///
/// Written by gameplay systems (the player controller sets horizontal
/// velocity and jump impulses) and consumed by
/// [`movement`](crate::systems::movement::movement).
#[derive(Component, Clone, Debug, Default)]
pub struct RigidBody {
    /// Current velocity in pixels per second.
    pub velocity: Vec2,
    /// Accelerations in pixels per second squared, summed every tick.
    pub forces: FxHashMap<String, Vec2>,
    /// When true, the movement system leaves the body alone.
    pub frozen: bool,
}

impl RigidBody {
    /// Create a RigidBody with zero velocity and no forces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Body falling under `gravity` pixels per second squared.
    pub fn with_gravity(gravity: f32) -> Self {
        let mut body = Self::new();
        body.add_force(GRAVITY, Vec2::new(0.0, gravity));
        body
    }

    /// Add or replace a named acceleration force.
    pub fn add_force(&mut self, name: &str, value: Vec2) {
        self.forces.insert(name.to_string(), value);
    }

    /// Sum of all forces.
    pub fn total_acceleration(&self) -> Vec2 {
        self.forces.values().fold(Vec2::ZERO, |acc, f| acc + *f)
    }

    /// Zero the velocity and stop the movement system from touching the body.
    pub fn freeze(&mut self) {
        self.velocity = Vec2::ZERO;
        self.frozen = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rigidbody_new() {
        let rb = RigidBody::new();
        assert_eq!(rb.velocity, Vec2::ZERO);
        assert!(rb.forces.is_empty());
        assert!(!rb.frozen);
    }

    #[test]
    fn gravity_is_a_named_force() {
        let rb = RigidBody::with_gravity(600.0);
        assert_eq!(rb.total_acceleration(), Vec2::new(0.0, 600.0));
    }

    #[test]
    fn forces_add_up_and_replace_by_name() {
        let mut rb = RigidBody::with_gravity(600.0);
        rb.add_force("wind", Vec2::new(10.0, 0.0));
        assert_eq!(rb.total_acceleration(), Vec2::new(10.0, 600.0));
        rb.add_force(GRAVITY, Vec2::new(0.0, 300.0));
        assert_eq!(rb.total_acceleration(), Vec2::new(10.0, 300.0));
    }

    #[test]
    fn freeze_zeroes_velocity() {
        let mut rb = RigidBody::new();
        rb.velocity = Vec2::new(160.0, -450.0);
        rb.freeze();
        assert!(rb.frozen);
        assert_eq!(rb.velocity, Vec2::ZERO);
    }
}
