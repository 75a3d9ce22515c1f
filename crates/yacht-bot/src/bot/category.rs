use super::BotDifficulty;
use yacht_core::model::category::{Category, CategoryMask};
use yacht_core::model::dice::Dice;
use yacht_core::model::scoring::{score_all, score_category};

/// A best raw score at or below this means the hand is a throwaway.
const SACRIFICE_THRESHOLD: u32 = 5;
/// Chance is only sacrificed for hands summing below this.
const CHANCE_SACRIFICE_SUM: u32 = 10;

/// Categories claimed outright whenever the hand makes them, in priority order.
const PRIORITY: [Category; 4] = [
    Category::Yahtzee,
    Category::LargeStraight,
    Category::SmallStraight,
    Category::FullHouse,
];

pub fn choose_category_for(
    dice: &Dice,
    used: &CategoryMask,
    _round: u8,
    difficulty: BotDifficulty,
) -> Option<Category> {
    match difficulty {
        BotDifficulty::Easy => choose_easy(dice, used),
        BotDifficulty::Normal | BotDifficulty::Hard => choose_prioritized(dice, used),
    }
}

/// Open category with the strictly greatest raw score.
pub fn choose_easy(dice: &Dice, used: &CategoryMask) -> Option<Category> {
    best_raw(dice, used).map(|(category, _)| category)
}

pub fn choose_prioritized(dice: &Dice, used: &CategoryMask) -> Option<Category> {
    if let Some(category) = PRIORITY
        .iter()
        .copied()
        .find(|cat| !used.is_used(*cat) && score_category(*cat, dice) > 0)
    {
        return Some(category);
    }

    let (best, best_score) = best_raw(dice, used)?;
    if best_score <= SACRIFICE_THRESHOLD {
        if !used.is_used(Category::Ones) {
            return Some(Category::Ones);
        }
        if !used.is_used(Category::Chance) && dice.sum() < CHANCE_SACRIFICE_SUM {
            return Some(Category::Chance);
        }
    }
    Some(best)
}

fn best_raw(dice: &Dice, used: &CategoryMask) -> Option<(Category, u32)> {
    let scores = score_all(dice);
    let mut best: Option<(Category, u32)> = None;
    for category in used.unused() {
        let score = scores[category.index()];
        if best.is_none_or(|(_, current)| score > current) {
            best = Some((category, score));
        }
    }
    best
}
