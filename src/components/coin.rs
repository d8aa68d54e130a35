//! Collectible coin.
use bevy_ecs::prelude::Component;

/// Score awarded per coin.
pub const COIN_VALUE: u32 = 10;
/// Seconds the collect animation plays before the coin is despawned.
pub const COIN_FADE_SECONDS: f32 = 0.2;

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Coin {
    pub collected: bool,
}

impl Coin {
    /// Mark the coin collected. Only the first call returns `true`.
    pub fn collect(&mut self) -> bool {
        !std::mem::replace(&mut self.collected, true)
    }
}
