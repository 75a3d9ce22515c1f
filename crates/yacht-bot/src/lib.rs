pub mod bot;
pub mod policy;

pub use bot::{
    BotDifficulty, Expectation, HoldPlan, HoldReason, SimulationParams, choose_category_for,
    choose_hold_mask, find_best_expected_category,
};
pub use policy::{EasyPolicy, HardPolicy, HoldDecision, NormalPolicy, Policy, PolicyContext};
