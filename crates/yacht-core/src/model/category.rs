use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub const CATEGORY_COUNT: usize = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Category {
    Ones = 0,
    Twos = 1,
    Threes = 2,
    Fours = 3,
    Fives = 4,
    Sixes = 5,
    ThreeOfAKind = 6,
    FourOfAKind = 7,
    FullHouse = 8,
    SmallStraight = 9,
    LargeStraight = 10,
    Yahtzee = 11,
    Chance = 12,
}

impl Category {
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yahtzee,
        Category::Chance,
    ];

    pub const UPPER: [Category; 6] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < CATEGORY_COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Scorecard row as shown to players (1..=13).
    pub const fn from_row(row: usize) -> Option<Self> {
        if row == 0 {
            None
        } else {
            Self::from_index(row - 1)
        }
    }

    /// Upper-section category counting `face` (1..=6).
    pub const fn for_face(face: u8) -> Option<Self> {
        if face >= 1 && face <= 6 {
            Some(Self::UPPER[(face - 1) as usize])
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn row(self) -> usize {
        self.index() + 1
    }

    pub const fn is_upper(self) -> bool {
        (self as u8) <= (Category::Sixes as u8)
    }

    /// Face counted by an upper-section category.
    pub const fn face(self) -> Option<u8> {
        if self.is_upper() {
            Some(self as u8 + 1)
        } else {
            None
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Category::Ones => "Ones",
            Category::Twos => "Twos",
            Category::Threes => "Threes",
            Category::Fours => "Fours",
            Category::Fives => "Fives",
            Category::Sixes => "Sixes",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::FourOfAKind => "Four of a Kind",
            Category::FullHouse => "Full House",
            Category::SmallStraight => "Small Straight",
            Category::LargeStraight => "Large Straight",
            Category::Yahtzee => "Yahtzee",
            Category::Chance => "Chance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError(pub String);

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {}", self.0)
    }
}

impl std::error::Error for ParseCategoryError {}

impl FromStr for Category {
    type Err = ParseCategoryError;

    /// Accepts a scorecard row number (1..=13) or a label, case and spacing insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(row) = trimmed.parse::<usize>() {
            return Category::from_row(row).ok_or_else(|| ParseCategoryError(trimmed.to_string()));
        }

        let normalized: String = trimmed
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Category::ALL
            .iter()
            .copied()
            .find(|cat| {
                cat.label()
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .map(|c| c.to_ascii_lowercase())
                    .eq(normalized.chars())
            })
            .ok_or_else(|| ParseCategoryError(trimmed.to_string()))
    }
}

/// Per-category used flags, indexed by declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryMask {
    flags: [bool; CATEGORY_COUNT],
}

impl CategoryMask {
    pub const fn empty() -> Self {
        Self {
            flags: [false; CATEGORY_COUNT],
        }
    }

    pub const fn from_flags(flags: [bool; CATEGORY_COUNT]) -> Self {
        Self { flags }
    }

    pub fn with(mut self, category: Category) -> Self {
        self.mark(category);
        self
    }

    pub fn mark(&mut self, category: Category) {
        self.flags[category.index()] = true;
    }

    pub const fn is_used(&self, category: Category) -> bool {
        self.flags[category.index()]
    }

    pub fn unused(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL
            .iter()
            .copied()
            .filter(|cat| !self.is_used(*cat))
    }

    pub fn used_count(&self) -> usize {
        self.flags.iter().filter(|used| **used).count()
    }

    pub fn is_full(&self) -> bool {
        self.flags.iter().all(|used| *used)
    }

    pub const fn flags(&self) -> &[bool; CATEGORY_COUNT] {
        &self.flags
    }
}
