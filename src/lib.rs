//! Ninja platformer library.
//!
//! A tile-based platformer with a built-in level editor. This crate exposes
//! the game's ECS components, resources, systems and events, the [`game`]
//! context that drives them, and [`replay`] input scripts for headless runs.

pub mod components;
pub mod events;
pub mod game;
pub mod replay;
pub mod resources;
pub mod systems;
