//! Monte Carlo estimate of how much each open category could still be worth.
//!
//! Every open category gets `trials` independent continuations. A continuation
//! keeps the dice a simple per-category rule would keep, rerolls the rest
//! `rolls_left` times, and scores the final hand. Full House, the straights
//! and Chance keep nothing during simulation, so their estimates run low
//! compared to the upper and N-of-a-kind categories.

use super::params::SimulationParams;
use rand::Rng;
use yacht_core::model::category::{Category, CategoryMask};
use yacht_core::model::dice::Dice;
use yacht_core::model::hold::HoldMask;
use yacht_core::model::scoring::score_category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expectation {
    pub category: Category,
    /// Truncated mean score over all trials.
    pub expected: u32,
}

/// Open category with the highest expected score; the lowest index wins ties.
pub fn find_best_expected_category<R: Rng + ?Sized>(
    dice: &Dice,
    used: &CategoryMask,
    rolls_left: u8,
    params: &SimulationParams,
    rng: &mut R,
) -> Option<Expectation> {
    let mut best: Option<Expectation> = None;
    for category in used.unused() {
        let expected = expected_score(category, dice, rolls_left, params.trials(), rng);
        if best.is_none_or(|current| expected > current.expected) {
            best = Some(Expectation { category, expected });
        }
    }
    best
}

pub fn expected_score<R: Rng + ?Sized>(
    category: Category,
    dice: &Dice,
    rolls_left: u8,
    trials: u32,
    rng: &mut R,
) -> u32 {
    let trials = trials.max(1);
    let held = simulation_hold(category, dice);
    let mut total: u64 = 0;
    for _ in 0..trials {
        let mut simulated = *dice;
        for _ in 0..rolls_left {
            simulated.roll(rng, &held);
        }
        total += score_category(category, &simulated) as u64;
    }
    (total / trials as u64) as u32
}

/// Dice kept while simulating `category`.
pub fn simulation_hold(category: Category, dice: &Dice) -> HoldMask {
    let target = match category {
        Category::Ones
        | Category::Twos
        | Category::Threes
        | Category::Fours
        | Category::Fives
        | Category::Sixes => category.face(),
        Category::ThreeOfAKind | Category::FourOfAKind | Category::Yahtzee => {
            Some(dice.most_frequent_face())
        }
        Category::FullHouse
        | Category::SmallStraight
        | Category::LargeStraight
        | Category::Chance => None,
    };
    match target {
        Some(face) => HoldMask::from_fn(|pos| dice.face(pos) == Some(face)),
        None => HoldMask::none(),
    }
}
