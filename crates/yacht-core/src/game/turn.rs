use crate::model::category::Category;
use crate::model::dice::Dice;
use crate::model::hold::HoldMask;
use crate::model::scorecard::{ScoreOutcome, Scorecard, ScorecardError};
use crate::model::scoring::{SpecialCombination, special_combination};
use core::fmt;
use rand::Rng;

pub const ROLLS_PER_TURN: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitRoll,
    Rolled,
    ScoreDecision,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnError {
    NoRollsLeft,
    NotRolled,
    AlreadyScored,
    Scorecard(ScorecardError),
}

impl fmt::Display for TurnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnError::NoRollsLeft => f.write_str("no rolls left this turn"),
            TurnError::NotRolled => f.write_str("dice have not been rolled yet"),
            TurnError::AlreadyScored => f.write_str("turn has already been scored"),
            TurnError::Scorecard(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for TurnError {}

impl From<ScorecardError> for TurnError {
    fn from(value: ScorecardError) -> Self {
        TurnError::Scorecard(value)
    }
}

/// Dice, holds and roll count for one player's turn.
#[derive(Debug, Clone)]
pub struct TurnState {
    dice: Dice,
    held: HoldMask,
    rolls_used: u8,
    phase: TurnPhase,
}

impl TurnState {
    /// Starts a turn showing `dice` from the previous turn, with nothing held.
    pub fn new(dice: Dice) -> Self {
        Self {
            dice,
            held: HoldMask::none(),
            rolls_used: 0,
            phase: TurnPhase::AwaitRoll,
        }
    }

    pub fn dice(&self) -> &Dice {
        &self.dice
    }

    pub fn held(&self) -> &HoldMask {
        &self.held
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn rolls_used(&self) -> u8 {
        self.rolls_used
    }

    pub fn rolls_left(&self) -> u8 {
        ROLLS_PER_TURN.saturating_sub(self.rolls_used)
    }

    pub fn can_roll(&self) -> bool {
        matches!(self.phase, TurnPhase::AwaitRoll | TurnPhase::Rolled) && self.rolls_left() > 0
    }

    pub fn set_held(&mut self, held: HoldMask) {
        self.held = held;
    }

    pub fn toggle_hold(&mut self, position: usize) {
        self.held.toggle(position);
    }

    /// Rolls unheld dice; the first roll of a turn ignores holds.
    pub fn roll<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Option<SpecialCombination>, TurnError> {
        if !self.can_roll() {
            return Err(match self.phase {
                TurnPhase::Done => TurnError::AlreadyScored,
                _ => TurnError::NoRollsLeft,
            });
        }

        if self.rolls_used == 0 {
            self.held.clear();
        }
        self.dice.roll(rng, &self.held);
        self.rolls_used += 1;
        self.phase = if self.rolls_left() == 0 {
            TurnPhase::ScoreDecision
        } else {
            TurnPhase::Rolled
        };
        Ok(special_combination(&self.dice))
    }

    /// Ends the rolling phase early.
    pub fn stop(&mut self) -> Result<(), TurnError> {
        match self.phase {
            TurnPhase::AwaitRoll => Err(TurnError::NotRolled),
            TurnPhase::Rolled | TurnPhase::ScoreDecision => {
                self.phase = TurnPhase::ScoreDecision;
                Ok(())
            }
            TurnPhase::Done => Err(TurnError::AlreadyScored),
        }
    }

    pub fn score(
        &mut self,
        category: Category,
        scorecard: &mut Scorecard,
    ) -> Result<ScoreOutcome, TurnError> {
        match self.phase {
            TurnPhase::AwaitRoll => return Err(TurnError::NotRolled),
            TurnPhase::Done => return Err(TurnError::AlreadyScored),
            TurnPhase::Rolled | TurnPhase::ScoreDecision => {}
        }
        let outcome = scorecard.record(category, &self.dice)?;
        self.phase = TurnPhase::Done;
        Ok(outcome)
    }
}
