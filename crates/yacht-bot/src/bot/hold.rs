use super::expectation::find_best_expected_category;
use super::params::SimulationParams;
use rand::Rng;
use yacht_core::model::category::{Category, CategoryMask};
use yacht_core::model::dice::{DICE_COUNT, Dice, MAX_FACE, MIN_FACE};
use yacht_core::model::hold::HoldMask;
use yacht_core::model::scoring::score_category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldReason {
    NoRollsLeft,
    InstantCommit,
    Expectation,
    NoOpenCategory,
}

impl HoldReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            HoldReason::NoRollsLeft => "no_rolls_left",
            HoldReason::InstantCommit => "instant_commit",
            HoldReason::Expectation => "expectation",
            HoldReason::NoOpenCategory => "no_open_category",
        }
    }
}

/// Hold mask together with the category it was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldPlan {
    pub mask: HoldMask,
    pub target: Option<Category>,
    pub expected: Option<u32>,
    pub reason: HoldReason,
}

impl HoldPlan {
    fn fixed(mask: HoldMask, target: Option<Category>, reason: HoldReason) -> Self {
        Self {
            mask,
            target,
            expected: None,
            reason,
        }
    }
}

/// Rare hands worth locking in immediately, checked in this order.
const INSTANT_COMMIT: [Category; 3] = [
    Category::Yahtzee,
    Category::LargeStraight,
    Category::FullHouse,
];

pub fn plan_hold<R: Rng + ?Sized>(
    dice: &Dice,
    used: &CategoryMask,
    rolls_left: u8,
    _round: u8,
    params: &SimulationParams,
    rng: &mut R,
) -> HoldPlan {
    if rolls_left == 0 {
        return HoldPlan::fixed(HoldMask::all(), None, HoldReason::NoRollsLeft);
    }

    if let Some(category) = INSTANT_COMMIT
        .iter()
        .copied()
        .find(|cat| !used.is_used(*cat) && score_category(*cat, dice) > 0)
    {
        return HoldPlan::fixed(HoldMask::all(), Some(category), HoldReason::InstantCommit);
    }

    match find_best_expected_category(dice, used, rolls_left, params, rng) {
        Some(best) => HoldPlan {
            mask: hold_for_target(best.category, dice),
            target: Some(best.category),
            expected: Some(best.expected),
            reason: HoldReason::Expectation,
        },
        None => HoldPlan::fixed(HoldMask::none(), None, HoldReason::NoOpenCategory),
    }
}

pub fn choose_hold_mask<R: Rng + ?Sized>(
    dice: &Dice,
    used: &CategoryMask,
    rolls_left: u8,
    round: u8,
    params: &SimulationParams,
    rng: &mut R,
) -> HoldMask {
    plan_hold(dice, used, rolls_left, round, params, rng).mask
}

/// Concrete dice to keep while chasing `category`.
pub fn hold_for_target(category: Category, dice: &Dice) -> HoldMask {
    match category {
        Category::Ones
        | Category::Twos
        | Category::Threes
        | Category::Fours
        | Category::Fives
        | Category::Sixes => match category.face() {
            Some(face) => hold_faces(dice, |f| f == face),
            None => HoldMask::none(),
        },
        Category::ThreeOfAKind | Category::FourOfAKind | Category::Yahtzee => {
            let face = dice.most_frequent_face();
            hold_faces(dice, |f| f == face)
        }
        Category::FullHouse => {
            let (triple, pair) = full_house_anchors(dice);
            hold_faces(dice, |f| f == triple || Some(f) == pair)
        }
        Category::SmallStraight | Category::LargeStraight => hold_distinct(dice),
        Category::Chance => hold_faces(dice, |f| f >= 4),
    }
}

fn hold_faces<F: Fn(u8) -> bool>(dice: &Dice, keep: F) -> HoldMask {
    HoldMask::from_fn(|pos| dice.face(pos).is_some_and(&keep))
}

/// Triple anchor (count >= 3, else most frequent) and an optional different pair face.
fn full_house_anchors(dice: &Dice) -> (u8, Option<u8>) {
    let counts = dice.face_counts();
    let triple = (MIN_FACE..=MAX_FACE)
        .find(|&face| counts[face as usize] >= 3)
        .unwrap_or_else(|| dice.most_frequent_face());
    let pair = (MIN_FACE..=MAX_FACE).find(|&face| face != triple && counts[face as usize] >= 2);
    (triple, pair)
}

/// First occurrence of each distinct face.
fn hold_distinct(dice: &Dice) -> HoldMask {
    let mut seen = [false; 7];
    let mut mask = HoldMask::none();
    for pos in 0..DICE_COUNT {
        if let Some(face) = dice.face(pos) {
            if !seen[face as usize] {
                seen[face as usize] = true;
                mask.set(pos, true);
            }
        }
    }
    mask
}
