//! ECS components for entities.
//!
//! Submodules overview:
//! - [`animation`] – playback state of the player's sprite tracks
//! - [`boxcollider`] – axis-aligned rectangular collider for overlap checks
//! - [`coin`] – collectible worth score
//! - [`goal`] – level exit marker
//! - [`mapposition`] – world-space position of an entity
//! - [`outcome`] – end-of-attempt overlay with its single action
//! - [`persistent`] – marker for entities that survive scene changes
//! - [`player`] – the controllable actor and its attack deadline
//! - [`rigidbody`] – kinematic body with velocity and named forces
//! - [`tilebody`] – collision facts against solid tiles (grounded, blocked)
//! - [`ttl`] – countdown that despawns its entity

pub mod animation;
pub mod boxcollider;
pub mod coin;
pub mod goal;
pub mod mapposition;
pub mod outcome;
pub mod persistent;
pub mod player;
pub mod rigidbody;
pub mod tilebody;
pub mod ttl;
