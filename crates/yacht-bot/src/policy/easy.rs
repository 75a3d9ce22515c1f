use super::{HoldDecision, Policy, PolicyContext};
use crate::bot::{BotDifficulty, choose_easy};
use rand::RngCore;
use tracing::{Level, event};
use yacht_core::model::category::Category;
use yacht_core::model::hold::HoldMask;

/// Never keeps dice and banks the best raw score on the table.
#[derive(Debug, Default, Clone, Copy)]
pub struct EasyPolicy;

impl EasyPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for EasyPolicy {
    fn difficulty(&self) -> BotDifficulty {
        BotDifficulty::Easy
    }

    fn choose_hold(&mut self, ctx: &PolicyContext, _rng: &mut dyn RngCore) -> HoldDecision {
        if ctx.rolls_left > 0 {
            HoldDecision::Reroll(HoldMask::none())
        } else {
            HoldDecision::Stop
        }
    }

    fn choose_category(&mut self, ctx: &PolicyContext) -> Option<Category> {
        let chosen = choose_easy(ctx.dice, ctx.used);
        if tracing::enabled!(Level::DEBUG) {
            event!(
                target: "yacht_bot::category",
                Level::DEBUG,
                difficulty = "easy",
                dice = %ctx.dice,
                round = ctx.round,
                chosen = ?chosen,
                reason = "easy_raw_max",
            );
        }
        chosen
    }
}
