//! Score and outcome of the current attempt.
use bevy_ecs::prelude::Resource;
use log::info;

use crate::components::coin::COIN_VALUE;

/// How the current attempt stands. `GameOver` and `Won` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    InProgress,
    GameOver,
    Won,
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    pub score: u32,
    pub collected: u32,
    pub total_coins: u32,
    pub outcome: Outcome,
}

impl Progress {
    /// Fresh counters for a level holding `total_coins` coins.
    pub fn new(total_coins: u32) -> Self {
        Self {
            total_coins,
            ..Self::default()
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome != Outcome::InProgress
    }

    /// Count one collected coin.
    pub fn award_coin(&mut self) {
        self.score += COIN_VALUE;
        self.collected += 1;
        info!(
            "Coin collected: score {} ({}/{})",
            self.score, self.collected, self.total_coins
        );
    }

    /// Move to a terminal outcome. Only the first call of an attempt has an
    /// effect; returns whether this call changed the outcome.
    pub fn finish(&mut self, outcome: Outcome) -> bool {
        if self.is_terminal() || outcome == Outcome::InProgress {
            return false;
        }
        self.outcome = outcome;
        info!("Attempt finished: {:?} with score {}", outcome, self.score);
        true
    }

    /// Text of the on-screen score counter.
    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }
}
