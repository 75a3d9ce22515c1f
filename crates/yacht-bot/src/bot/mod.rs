mod category;
mod expectation;
mod hold;
mod params;

pub use category::{choose_category_for, choose_easy, choose_prioritized};
pub use expectation::{Expectation, expected_score, find_best_expected_category, simulation_hold};
pub use hold::{HoldPlan, HoldReason, choose_hold_mask, hold_for_target, plan_hold};
pub use params::SimulationParams;

use core::fmt;
use core::str::FromStr;

pub const DIFFICULTY_ENV: &str = "YACHT_BOT_DIFFICULTY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BotDifficulty {
    Easy,
    Normal,
    Hard,
}

impl Default for BotDifficulty {
    fn default() -> Self {
        Self::Normal
    }
}

impl BotDifficulty {
    pub const ALL: [BotDifficulty; 3] = [
        BotDifficulty::Easy,
        BotDifficulty::Normal,
        BotDifficulty::Hard,
    ];

    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        read(DIFFICULTY_ENV)
            .and_then(|raw| raw.parse::<BotDifficulty>().ok())
            .unwrap_or_default()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BotDifficulty::Easy => "easy",
            BotDifficulty::Normal => "normal",
            BotDifficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for BotDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDifficultyError(pub String);

impl fmt::Display for ParseDifficultyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid difficulty: {}. Valid values: easy (1), normal (2), hard (3)",
            self.0
        )
    }
}

impl std::error::Error for ParseDifficultyError {}

impl FromStr for BotDifficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "1" => Ok(BotDifficulty::Easy),
            "normal" | "default" | "2" => Ok(BotDifficulty::Normal),
            "hard" | "3" => Ok(BotDifficulty::Hard),
            other => Err(ParseDifficultyError(other.to_string())),
        }
    }
}
