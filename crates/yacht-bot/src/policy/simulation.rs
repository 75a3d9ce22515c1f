use super::{HoldDecision, Policy, PolicyContext};
use crate::bot::{BotDifficulty, HoldPlan, SimulationParams, choose_prioritized, plan_hold};
use rand::RngCore;
use tracing::{Level, event};
use yacht_core::model::category::Category;

/// Monte Carlo holding with prioritized category selection.
#[derive(Debug, Clone, Copy)]
pub struct NormalPolicy {
    params: SimulationParams,
}

impl NormalPolicy {
    pub fn new(params: SimulationParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> SimulationParams {
        self.params
    }
}

impl Default for NormalPolicy {
    fn default() -> Self {
        Self::new(SimulationParams::default())
    }
}

impl Policy for NormalPolicy {
    fn difficulty(&self) -> BotDifficulty {
        BotDifficulty::Normal
    }

    fn choose_hold(&mut self, ctx: &PolicyContext, rng: &mut dyn RngCore) -> HoldDecision {
        simulated_hold(BotDifficulty::Normal, &self.params, ctx, rng)
    }

    fn choose_category(&mut self, ctx: &PolicyContext) -> Option<Category> {
        prioritized_category(BotDifficulty::Normal, ctx)
    }
}

/// Same decision rules as [`NormalPolicy`], tuned separately through its own
/// simulation parameters.
#[derive(Debug, Clone, Copy)]
pub struct HardPolicy {
    params: SimulationParams,
}

impl HardPolicy {
    pub fn new(params: SimulationParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> SimulationParams {
        self.params
    }
}

impl Default for HardPolicy {
    fn default() -> Self {
        Self::new(SimulationParams::default())
    }
}

impl Policy for HardPolicy {
    fn difficulty(&self) -> BotDifficulty {
        BotDifficulty::Hard
    }

    fn choose_hold(&mut self, ctx: &PolicyContext, rng: &mut dyn RngCore) -> HoldDecision {
        simulated_hold(BotDifficulty::Hard, &self.params, ctx, rng)
    }

    fn choose_category(&mut self, ctx: &PolicyContext) -> Option<Category> {
        prioritized_category(BotDifficulty::Hard, ctx)
    }
}

fn simulated_hold(
    difficulty: BotDifficulty,
    params: &SimulationParams,
    ctx: &PolicyContext,
    rng: &mut dyn RngCore,
) -> HoldDecision {
    let plan = plan_hold(ctx.dice, ctx.used, ctx.rolls_left, ctx.round, params, rng);
    log_hold_decision(difficulty, params, ctx, &plan);
    if plan.mask.is_all() {
        HoldDecision::Stop
    } else {
        HoldDecision::Reroll(plan.mask)
    }
}

fn prioritized_category(difficulty: BotDifficulty, ctx: &PolicyContext) -> Option<Category> {
    let chosen = choose_prioritized(ctx.dice, ctx.used);
    if tracing::enabled!(Level::DEBUG) {
        event!(
            target: "yacht_bot::category",
            Level::DEBUG,
            difficulty = %difficulty,
            dice = %ctx.dice,
            round = ctx.round,
            open = 13 - ctx.used.used_count(),
            chosen = ?chosen,
            reason = "prioritized",
        );
    }
    chosen
}

fn log_hold_decision(
    difficulty: BotDifficulty,
    params: &SimulationParams,
    ctx: &PolicyContext,
    plan: &HoldPlan,
) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }

    event!(
        target: "yacht_bot::hold",
        Level::DEBUG,
        difficulty = %difficulty,
        dice = %ctx.dice,
        rolls_left = ctx.rolls_left,
        round = ctx.round,
        trials = params.trials(),
        goal = ?plan.target,
        expected = ?plan.expected,
        mask = %plan.mask,
        reason = plan.reason.as_str(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use yacht_core::model::category::CategoryMask;
    use yacht_core::model::dice::Dice;
    use yacht_core::model::hold::HoldMask;

    fn ctx<'a>(dice: &'a Dice, used: &'a CategoryMask, rolls_left: u8) -> PolicyContext<'a> {
        PolicyContext {
            dice,
            used,
            rolls_left,
            round: 2,
        }
    }

    #[test]
    fn hard_stops_on_locked_in_yahtzee() {
        let mut rng = StdRng::seed_from_u64(1);
        let dice = Dice::new([2, 2, 2, 2, 2]).unwrap();
        let used = CategoryMask::empty();
        let mut policy = HardPolicy::new(SimulationParams::new(20));
        assert_eq!(
            policy.choose_hold(&ctx(&dice, &used, 2), &mut rng),
            HoldDecision::Stop
        );
    }

    #[test]
    fn normal_rerolls_toward_upper_target() {
        let mut rng = StdRng::seed_from_u64(2);
        let dice = Dice::new([6, 6, 6, 1, 2]).unwrap();
        // Only Sixes is open, so the plan must keep the three sixes.
        let mut flags = [true; 13];
        flags[Category::Sixes.index()] = false;
        let used = CategoryMask::from_flags(flags);
        let mut policy = NormalPolicy::new(SimulationParams::new(20));
        assert_eq!(
            policy.choose_hold(&ctx(&dice, &used, 1), &mut rng),
            HoldDecision::Reroll(HoldMask::from_flags([true, true, true, false, false]))
        );
    }

    #[test]
    fn both_tiers_share_category_rules() {
        let dice = Dice::new([3, 4, 5, 6, 6]).unwrap();
        let used = CategoryMask::empty();
        let c = ctx(&dice, &used, 0);
        assert_eq!(
            NormalPolicy::default().choose_category(&c),
            Some(Category::SmallStraight)
        );
        assert_eq!(
            HardPolicy::default().choose_category(&c),
            Some(Category::SmallStraight)
        );
    }
}
