//! Category scoring for a single hand.
//!
//! Raw scores depend only on the dice. The joker override, which also depends
//! on what a player has already recorded, lives in [`joker_score`].

use crate::model::category::Category;
use crate::model::dice::{Dice, MAX_FACE, MIN_FACE};
use crate::model::scorecard::Scorecard;
use core::fmt;

pub const FULL_HOUSE_SCORE: u32 = 25;
pub const SMALL_STRAIGHT_SCORE: u32 = 30;
pub const LARGE_STRAIGHT_SCORE: u32 = 40;
pub const YAHTZEE_SCORE: u32 = 50;
pub const YAHTZEE_BONUS_SCORE: u32 = 100;
pub const UPPER_BONUS_THRESHOLD: u32 = 63;
pub const UPPER_BONUS_SCORE: u32 = 35;

pub fn score_category(category: Category, dice: &Dice) -> u32 {
    match category {
        Category::Ones
        | Category::Twos
        | Category::Threes
        | Category::Fours
        | Category::Fives
        | Category::Sixes => score_upper(dice, category.face().unwrap_or(MIN_FACE)),
        Category::ThreeOfAKind => score_of_a_kind(dice, 3),
        Category::FourOfAKind => score_of_a_kind(dice, 4),
        Category::FullHouse => score_full_house(dice),
        Category::SmallStraight => score_small_straight(dice),
        Category::LargeStraight => score_large_straight(dice),
        Category::Yahtzee => score_yahtzee(dice),
        Category::Chance => dice.sum(),
    }
}

/// Raw scores for every category, indexed by [`Category::index`].
pub fn score_all(dice: &Dice) -> [u32; 13] {
    Category::ALL.map(|category| score_category(category, dice))
}

/// Highest score a category can ever yield.
pub const fn max_score(category: Category) -> u32 {
    match category {
        Category::Ones => 5,
        Category::Twos => 10,
        Category::Threes => 15,
        Category::Fours => 20,
        Category::Fives => 25,
        Category::Sixes => 30,
        Category::ThreeOfAKind | Category::FourOfAKind | Category::Chance => 30,
        Category::FullHouse => FULL_HOUSE_SCORE,
        Category::SmallStraight => SMALL_STRAIGHT_SCORE,
        Category::LargeStraight => LARGE_STRAIGHT_SCORE,
        Category::Yahtzee => YAHTZEE_SCORE,
    }
}

pub fn score_upper(dice: &Dice, face: u8) -> u32 {
    dice.count_of(face) as u32 * face as u32
}

fn score_of_a_kind(dice: &Dice, needed: u8) -> u32 {
    let counts = dice.face_counts();
    if counts.iter().any(|&count| count >= needed) {
        dice.sum()
    } else {
        0
    }
}

fn score_full_house(dice: &Dice) -> u32 {
    let counts = dice.face_counts();
    let has_three = counts[1..].iter().any(|&count| count == 3);
    let has_two = counts[1..].iter().any(|&count| count == 2);
    if has_three && has_two {
        FULL_HOUSE_SCORE
    } else {
        0
    }
}

fn score_small_straight(dice: &Dice) -> u32 {
    if longest_run(dice) >= 4 {
        SMALL_STRAIGHT_SCORE
    } else {
        0
    }
}

fn score_large_straight(dice: &Dice) -> u32 {
    if longest_run(dice) >= 5 {
        LARGE_STRAIGHT_SCORE
    } else {
        0
    }
}

fn score_yahtzee(dice: &Dice) -> u32 {
    if dice.is_yahtzee() { YAHTZEE_SCORE } else { 0 }
}

/// Length of the longest run of consecutive distinct faces.
pub fn longest_run(dice: &Dice) -> u8 {
    let counts = dice.face_counts();
    let mut best = 0;
    let mut current = 0;
    for face in MIN_FACE..=MAX_FACE {
        if counts[face as usize] > 0 {
            current += 1;
            best = best.max(current);
        } else {
            current = 0;
        }
    }
    best
}

/// Whether a repeat Yahtzee is eligible for joker scoring on this scorecard.
pub fn joker_active(dice: &Dice, scorecard: &Scorecard) -> bool {
    dice.is_yahtzee()
        && scorecard.is_used(Category::Yahtzee)
        && scorecard.score(Category::Yahtzee).unwrap_or(0) > 0
}

/// Score `category` would record for `dice` on `scorecard`, applying the joker rule.
///
/// While the upper box matching the Yahtzee's face is open, every upper box is
/// scored as that face.
pub fn joker_score(category: Category, dice: &Dice, scorecard: &Scorecard) -> u32 {
    if !joker_active(dice, scorecard) {
        return score_category(category, dice);
    }
    match category {
        Category::FullHouse => FULL_HOUSE_SCORE,
        Category::SmallStraight => SMALL_STRAIGHT_SCORE,
        Category::LargeStraight => LARGE_STRAIGHT_SCORE,
        upper if upper.is_upper() => match joker_upper_category(dice, scorecard) {
            Some(preferred) => score_upper(dice, preferred.face().unwrap_or(MIN_FACE)),
            None => score_category(upper, dice),
        },
        other => score_category(other, dice),
    }
}

/// Upper box matching a joker Yahtzee's face, if it is still open.
pub fn joker_upper_category(dice: &Dice, scorecard: &Scorecard) -> Option<Category> {
    if !joker_active(dice, scorecard) {
        return None;
    }
    dice.face(0)
        .and_then(Category::for_face)
        .filter(|category| !scorecard.is_used(*category))
}

/// Notable hands announced by the front end after a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialCombination {
    Yahtzee,
    LargeStraight,
    SmallStraight,
    FullHouse,
    FourOfAKind,
    ThreeOfAKind,
}

impl SpecialCombination {
    pub const fn label(self) -> &'static str {
        match self {
            SpecialCombination::Yahtzee => "Yahtzee!",
            SpecialCombination::LargeStraight => "Large Straight!",
            SpecialCombination::SmallStraight => "Small Straight!",
            SpecialCombination::FullHouse => "Full House!",
            SpecialCombination::FourOfAKind => "Four of a Kind!",
            SpecialCombination::ThreeOfAKind => "Three of a Kind!",
        }
    }

    pub const fn category(self) -> Category {
        match self {
            SpecialCombination::Yahtzee => Category::Yahtzee,
            SpecialCombination::LargeStraight => Category::LargeStraight,
            SpecialCombination::SmallStraight => Category::SmallStraight,
            SpecialCombination::FullHouse => Category::FullHouse,
            SpecialCombination::FourOfAKind => Category::FourOfAKind,
            SpecialCombination::ThreeOfAKind => Category::ThreeOfAKind,
        }
    }
}

impl fmt::Display for SpecialCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const SPECIAL_PRIORITY: [SpecialCombination; 6] = [
    SpecialCombination::Yahtzee,
    SpecialCombination::LargeStraight,
    SpecialCombination::SmallStraight,
    SpecialCombination::FullHouse,
    SpecialCombination::FourOfAKind,
    SpecialCombination::ThreeOfAKind,
];

pub fn special_combination(dice: &Dice) -> Option<SpecialCombination> {
    SPECIAL_PRIORITY
        .iter()
        .copied()
        .find(|combo| score_category(combo.category(), dice) > 0)
}
