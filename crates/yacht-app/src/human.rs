use core::fmt;
use yacht_core::model::category::Category;
use yacht_core::model::dice::DICE_COUNT;

/// One line typed during the hold phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoldCommand {
    /// Zero-based dice positions to flip, sorted and unique.
    Toggle(Vec<usize>),
    Reroll,
    Score,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    MissingDice,
    Unknown(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => f.write_str("Enter a command: t, r or s."),
            CommandError::MissingDice => f.write_str("Invalid command. (example: t 1 2)"),
            CommandError::Unknown(cmd) => write!(f, "Invalid command: {cmd}"),
        }
    }
}

impl std::error::Error for CommandError {}

/// Parses `t 1 2`, `t1,3`, `r` or `s`. Only the first letter of the command word
/// matters and case is ignored.
pub fn parse_hold_command(line: &str) -> Result<HoldCommand, CommandError> {
    let trimmed = line.trim();
    let Some(first) = trimmed.chars().next() else {
        return Err(CommandError::Empty);
    };
    match first.to_ascii_lowercase() {
        't' => {
            let Some(start) = trimmed.find(|c: char| c.is_ascii_digit()) else {
                return Err(CommandError::MissingDice);
            };
            Ok(HoldCommand::Toggle(parse_indices(&trimmed[start..])))
        }
        'r' => Ok(HoldCommand::Reroll),
        's' => Ok(HoldCommand::Score),
        _ => Err(CommandError::Unknown(
            trimmed.split_whitespace().next().unwrap_or(trimmed).to_string(),
        )),
    }
}

/// Dice positions from a comma or space separated list of 1-based numbers.
///
/// Out-of-range numbers are dropped and stray tokens end the list.
pub fn parse_indices(text: &str) -> Vec<usize> {
    let mut indices: Vec<usize> = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map_while(|token| token.parse::<usize>().ok())
        .filter(|&n| (1..=DICE_COUNT).contains(&n))
        .map(|n| n - 1)
        .collect();
    indices.sort_unstable();
    indices.dedup();
    indices
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryInputError {
    NotANumber,
    OutOfRange,
    AlreadyUsed(Category),
}

impl fmt::Display for CategoryInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryInputError::NotANumber | CategoryInputError::OutOfRange => {
                f.write_str("Enter a number between 1 and 13.")
            }
            CategoryInputError::AlreadyUsed(category) => {
                write!(f, "{category} has already been used.")
            }
        }
    }
}

impl std::error::Error for CategoryInputError {}

/// Category row number typed at the scoring prompt; `is_used` rejects filled boxes.
pub fn parse_category_choice(
    line: &str,
    is_used: impl Fn(Category) -> bool,
) -> Result<Category, CategoryInputError> {
    let token = line.split_whitespace().next().unwrap_or("");
    let row: usize = token.parse().map_err(|_| CategoryInputError::NotANumber)?;
    let category = Category::from_row(row).ok_or(CategoryInputError::OutOfRange)?;
    if is_used(category) {
        return Err(CategoryInputError::AlreadyUsed(category));
    }
    Ok(category)
}
