//! Event types and observers.
//!
//! Submodules:
//! - [`collision`] – player overlaps with coins and the goal
//! - [`gamestate`] – scene transitions and the observer applying them
//! - [`input`] – raw host input queued for the next tick
pub mod collision;
pub mod gamestate;
pub mod input;
