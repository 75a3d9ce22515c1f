//! Plain-text views of scorecards, dice and leaderboards.

use crate::store::ScoreEntry;
use std::fmt::Write;
use yacht_core::game::match_state::ROUNDS_PER_GAME;
use yacht_core::model::category::Category;
use yacht_core::model::dice::Dice;
use yacht_core::model::hold::HoldMask;
use yacht_core::model::scorecard::Scorecard;
use yacht_core::model::scoring::{
    UPPER_BONUS_THRESHOLD, YAHTZEE_BONUS_SCORE, joker_active, joker_upper_category,
};

const LABEL_WIDTH: usize = 22;
const NAME_WIDTH: usize = 12;

/// Pads or truncates `name` to exactly `width` characters.
pub fn fit_name(name: &str, width: usize) -> String {
    let mut out: String = name.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat_n(' ', width - len));
    out
}

fn row_label(category: Category) -> String {
    format!(" {:>2}) {}", category.row(), category.label())
}

fn line(out: &mut String, label: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "{label:<LABEL_WIDTH$}: {value}");
}

pub fn render_scorecard(card: &Scorecard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", card.name());
    for category in Category::UPPER {
        render_box(&mut out, card, category);
    }
    line(
        &mut out,
        " Subtotal",
        format_args!("{} / {UPPER_BONUS_THRESHOLD}", card.upper_sum()),
    );
    line(&mut out, " +35 Bonus", card.upper_bonus());
    out.push('\n');
    for category in Category::ALL.iter().copied().filter(|c| !c.is_upper()) {
        render_box(&mut out, card, category);
    }
    out.push('\n');
    line(
        &mut out,
        &format!(" Yahtzee Bonus x {}", card.yahtzee_bonus_count()),
        card.yahtzee_bonus_count() * YAHTZEE_BONUS_SCORE,
    );
    line(&mut out, " Total", card.total());
    out
}

fn render_box(out: &mut String, card: &Scorecard, category: Category) {
    match card.score(category) {
        Some(points) => line(out, &row_label(category), points),
        None => line(out, &row_label(category), "(open)"),
    }
}

/// Running totals with a marker on the acting player.
pub fn render_standings(cards: &[Scorecard], current: Option<usize>) -> String {
    let mut out = String::from("--- Totals ---\n");
    for (idx, card) in cards.iter().enumerate() {
        let marker = if current == Some(idx) { " > " } else { "   " };
        let _ = writeln!(out, "{marker}{} : {}", fit_name(card.name(), NAME_WIDTH), card.total());
    }
    out
}

pub fn render_dice(dice: &Dice, held: &HoldMask) -> String {
    let mut faces = String::new();
    let mut marks = String::new();
    let mut positions = String::new();
    for (pos, face) in dice.iter().enumerate() {
        let _ = write!(faces, " [{face}]");
        marks.push_str(if held.is_held(pos) { " HLD" } else { "    " });
        let _ = write!(positions, " ({})", pos + 1);
    }
    format!("{faces}\n{}\n{positions}\n", marks.trim_end())
}

/// Points each open category would record right now.
pub fn render_previews(card: &Scorecard, dice: &Dice) -> String {
    let mut out = String::new();
    if joker_active(dice, card) {
        out.push_str("--- Possible scores (Joker!) ---\n");
    } else {
        out.push_str("--- Possible scores ---\n");
    }
    for category in card.used().unused() {
        let _ = writeln!(
            out,
            "{:<LABEL_WIDTH$}= {}",
            row_label(category),
            card.preview(category, dice)
        );
    }
    if let Some(category) = joker_upper_category(dice, card) {
        let _ = writeln!(out, "Joker: {category} is still open for this Yahtzee.");
    }
    out
}

/// Full board shown to a human before each decision.
pub fn render_turn(
    cards: &[Scorecard],
    current: usize,
    round: u8,
    rolls_left: u8,
    dice: &Dice,
    held: &HoldMask,
) -> String {
    let mut out = String::new();
    let Some(card) = cards.get(current) else {
        return out;
    };
    out.push_str(&render_scorecard(card));
    out.push('\n');
    out.push_str(&render_standings(cards, Some(current)));
    out.push('\n');
    let _ = writeln!(out, "--- Round {round} / {ROUNDS_PER_GAME} --- ({})", card.name());
    let _ = writeln!(out, "Rolls left: {rolls_left}");
    out.push_str(&render_dice(dice, held));
    out.push('\n');
    out.push_str(&render_previews(card, dice));
    out
}

pub fn render_leaderboard(entries: &[ScoreEntry]) -> String {
    let mut out = String::from("===== Top Scores =====\n");
    if entries.is_empty() {
        out.push_str("No scores recorded yet.\n");
        return out;
    }
    for (rank, entry) in entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}. {} : {}",
            rank + 1,
            fit_name(&entry.name, NAME_WIDTH),
            entry.score
        );
    }
    out
}

/// Final results in standing order, with the winner announced last.
pub fn render_final(cards: &[Scorecard], standings: &[usize]) -> String {
    let mut out = String::from("========== Final Results ==========\n");
    for &idx in standings {
        if let Some(card) = cards.get(idx) {
            let _ = writeln!(
                out,
                "{} : {} points",
                fit_name(card.name(), NAME_WIDTH),
                card.total()
            );
        }
    }
    if let Some(winner) = standings.first().and_then(|&idx| cards.get(idx)) {
        let _ = writeln!(out, "\n'{}' wins!", winner.name());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dice(faces: [u8; 5]) -> Dice {
        Dice::new(faces).expect("valid dice")
    }

    #[test]
    fn fit_name_pads_and_truncates() {
        assert_eq!(fit_name("Ann", 5), "Ann  ");
        assert_eq!(fit_name("Computer 12", 8), "Computer");
        assert_eq!(fit_name("", 2), "  ");
    }

    #[test]
    fn scorecard_shows_open_and_filled_boxes() {
        let mut card = Scorecard::new("Ann");
        card.record(Category::Fives, &dice([5, 5, 5, 1, 2])).unwrap();
        let text = render_scorecard(&card);
        assert!(text.contains("=== Ann ==="));
        assert!(text.contains("  5) Fives"));
        assert!(text.contains(": 15"));
        assert!(text.contains("15 / 63"));
        assert!(text.contains("(open)"));
        assert!(text.ends_with(": 15\n"));
    }

    #[test]
    fn dice_view_marks_held_positions() {
        let held = HoldMask::from_flags([true, false, false, false, true]);
        let text = render_dice(&dice([6, 1, 2, 3, 6]), &held);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], " [6] [1] [2] [3] [6]");
        assert_eq!(lines[1], " HLD             HLD");
        assert_eq!(lines[2], " (1) (2) (3) (4) (5)");
    }

    #[test]
    fn previews_list_only_open_categories() {
        let mut card = Scorecard::new("Bo");
        card.record(Category::Chance, &dice([1, 2, 3, 4, 5])).unwrap();
        let text = render_previews(&card, &dice([2, 3, 4, 5, 6]));
        assert!(text.contains("Large Straight"));
        assert!(text.contains("= 40"));
        assert!(!text.contains("Chance"));
        assert!(!text.contains("Joker"));
    }

    #[test]
    fn previews_flag_joker_and_open_upper_box() {
        let mut card = Scorecard::new("Cy");
        card.record(Category::Yahtzee, &dice([3, 3, 3, 3, 3])).unwrap();
        let text = render_previews(&card, &dice([4, 4, 4, 4, 4]));
        assert!(text.starts_with("--- Possible scores (Joker!) ---"));
        assert!(text.contains("Joker: Fours is still open"));
    }

    #[test]
    fn final_results_announce_winner() {
        let mut a = Scorecard::new("Ann");
        let mut b = Scorecard::new("Bo");
        a.record(Category::Chance, &dice([1, 1, 1, 1, 2])).unwrap();
        b.record(Category::Chance, &dice([6, 6, 6, 6, 5])).unwrap();
        let text = render_final(&[a, b], &[1, 0]);
        let bo = text.find("Bo").unwrap();
        let ann = text.find("Ann").unwrap();
        assert!(bo < ann);
        assert!(text.contains("'Bo' wins!"));
    }

    #[test]
    fn empty_leaderboard_message() {
        assert!(render_leaderboard(&[]).contains("No scores recorded yet."));
    }
}
