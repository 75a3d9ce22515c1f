use crate::model::category::{CATEGORY_COUNT, Category, CategoryMask};
use crate::model::dice::Dice;
use crate::model::scoring::{
    UPPER_BONUS_SCORE, UPPER_BONUS_THRESHOLD, YAHTZEE_BONUS_SCORE, joker_active, joker_score,
};
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    name: String,
    scores: [u32; CATEGORY_COUNT],
    used: CategoryMask,
    yahtzee_bonus_count: u32,
}

/// Result of committing a hand to a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreOutcome {
    pub category: Category,
    pub points: u32,
    pub joker_bonus: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScorecardError {
    CategoryUsed(Category),
}

impl fmt::Display for ScorecardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScorecardError::CategoryUsed(category) => {
                write!(f, "{category} has already been scored")
            }
        }
    }
}

impl std::error::Error for ScorecardError {}

impl Scorecard {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scores: [0; CATEGORY_COUNT],
            used: CategoryMask::empty(),
            yahtzee_bonus_count: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn used(&self) -> &CategoryMask {
        &self.used
    }

    pub fn is_used(&self, category: Category) -> bool {
        self.used.is_used(category)
    }

    /// Recorded score, or `None` while the category is open.
    pub fn score(&self, category: Category) -> Option<u32> {
        self.is_used(category).then(|| self.scores[category.index()])
    }

    pub fn yahtzee_bonus_count(&self) -> u32 {
        self.yahtzee_bonus_count
    }

    pub fn is_complete(&self) -> bool {
        self.used.is_full()
    }

    /// Points `category` would record for `dice`, joker rule included.
    pub fn preview(&self, category: Category, dice: &Dice) -> u32 {
        joker_score(category, dice, self)
    }

    /// Commits `dice` to `category`; a repeat Yahtzee under the joker rule adds one bonus.
    pub fn record(
        &mut self,
        category: Category,
        dice: &Dice,
    ) -> Result<ScoreOutcome, ScorecardError> {
        if self.is_used(category) {
            return Err(ScorecardError::CategoryUsed(category));
        }

        let joker_bonus = joker_active(dice, self);
        let points = self.preview(category, dice);
        self.scores[category.index()] = points;
        self.used.mark(category);
        if joker_bonus {
            self.yahtzee_bonus_count += 1;
        }

        Ok(ScoreOutcome {
            category,
            points,
            joker_bonus,
        })
    }

    pub fn upper_sum(&self) -> u32 {
        self.section_sum(Category::ALL.iter().copied().filter(|c| c.is_upper()))
    }

    pub fn lower_sum(&self) -> u32 {
        self.section_sum(Category::ALL.iter().copied().filter(|c| !c.is_upper()))
    }

    pub fn upper_bonus(&self) -> u32 {
        if self.upper_sum() >= UPPER_BONUS_THRESHOLD {
            UPPER_BONUS_SCORE
        } else {
            0
        }
    }

    pub fn yahtzee_bonus(&self) -> u32 {
        self.yahtzee_bonus_count * YAHTZEE_BONUS_SCORE
    }

    pub fn total(&self) -> u32 {
        self.upper_sum() + self.upper_bonus() + self.lower_sum() + self.yahtzee_bonus()
    }

    fn section_sum(&self, categories: impl Iterator<Item = Category>) -> u32 {
        categories.filter_map(|category| self.score(category)).sum()
    }
}
