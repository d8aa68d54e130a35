//! ECS resources made available to systems.
//!
//! Overview
//! - `editor` – document and tool state of the level editor
//! - `gameconfig` – INI-backed settings (level defaults, tuning, storage)
//! - `gamestate` – current scene and pending transition with its level
//! - `input` – per-tick logical input state
//! - `level` – tile codes, the level document and its text codec
//! - `levelstore` – named storage slots and level errors
//! - `playfield` – solid grid and spawn cells of the level being played
//! - `progress` – score, coin counters and outcome of the attempt
//! - `worldtime` – simulation time and delta
pub mod editor;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod level;
pub mod levelstore;
pub mod playfield;
pub mod progress;
pub mod worldtime;
