mod easy;
mod simulation;

pub use easy::EasyPolicy;
pub use simulation::{HardPolicy, NormalPolicy};

use crate::bot::{BotDifficulty, SimulationParams};
use rand::RngCore;
use yacht_core::model::category::{Category, CategoryMask};
use yacht_core::model::dice::Dice;
use yacht_core::model::hold::HoldMask;

/// Everything a policy sees when asked for a decision.
#[derive(Debug, Clone, Copy)]
pub struct PolicyContext<'a> {
    pub dice: &'a Dice,
    pub used: &'a CategoryMask,
    pub rolls_left: u8,
    pub round: u8,
}

/// Answer to "what now?" between rolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldDecision {
    /// Reroll every die not marked in the mask.
    Reroll(HoldMask),
    /// Keep the dice as they are and move on to scoring.
    Stop,
}

/// Unified interface for computer players of every tier
pub trait Policy: Send {
    fn difficulty(&self) -> BotDifficulty;

    /// Decide what to keep before the next roll (only asked while rolls remain)
    fn choose_hold(&mut self, ctx: &PolicyContext, rng: &mut dyn RngCore) -> HoldDecision;

    /// Pick an open category for the final dice; `None` only when the card is full
    fn choose_category(&mut self, ctx: &PolicyContext) -> Option<Category>;
}

impl BotDifficulty {
    /// Builds the policy for this tier; `params` only matters for holding tiers.
    pub fn create_policy(self, params: SimulationParams) -> Box<dyn Policy> {
        match self {
            BotDifficulty::Easy => Box::new(EasyPolicy::new()),
            BotDifficulty::Normal => Box::new(NormalPolicy::new(params)),
            BotDifficulty::Hard => Box::new(HardPolicy::new(params)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_matches_difficulty() {
        for difficulty in BotDifficulty::ALL {
            let policy = difficulty.create_policy(SimulationParams::new(4));
            assert_eq!(policy.difficulty(), difficulty);
        }
    }
}
