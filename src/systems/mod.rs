//! Game systems.
//!
//! This module groups all ECS systems that advance input, the scenes and
//! the simulation.
//!
//! Submodules overview
//! - [`animation`] – advance the frame of each animation track
//! - [`collision`] – player overlaps with coins and the goal, and their rules
//! - [`editor`] – level editor tools, painting and persistence
//! - [`gamestate`] – check for pending scene changes and scene run conditions
//! - [`input`] – fold host input events into [`crate::resources::input::InputState`]
//! - [`menu`] – main menu choices
//! - [`movement`] – integrate forces and move bodies against solid tiles
//! - [`outcome`] – leave an attempt through the outcome overlay or back key
//! - [`player`] – per-tick player state machine
//! - [`time`] – update simulation time and delta
//! - [`ttl`] – despawn entities whose time ran out

pub mod animation;
pub mod collision;
pub mod editor;
pub mod gamestate;
pub mod input;
pub mod menu;
pub mod movement;
pub mod outcome;
pub mod player;
pub mod time;
pub mod ttl;
