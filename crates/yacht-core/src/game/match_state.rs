use crate::model::category::CATEGORY_COUNT;
use crate::model::dice::Dice;
use crate::model::scorecard::Scorecard;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub const ROUNDS_PER_GAME: u8 = CATEGORY_COUNT as u8;

/// Players, round counter and the shared dice generator for one game.
#[derive(Debug, Clone)]
pub struct MatchState {
    scorecards: Vec<Scorecard>,
    round_number: u8,
    current_player: usize,
    dice: Dice,
    rng: StdRng,
    seed: u64,
}

impl MatchState {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let seed: u64 = rand::random();
        Self::with_seed(names, seed)
    }

    pub fn with_seed<I, S>(names: I, seed: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            scorecards: names.into_iter().map(Scorecard::new).collect(),
            round_number: 1,
            current_player: 0,
            dice: Dice::initial(),
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn round_number(&self) -> u8 {
        self.round_number
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn player_count(&self) -> usize {
        self.scorecards.len()
    }

    pub fn scorecards(&self) -> &[Scorecard] {
        &self.scorecards
    }

    pub fn scorecard(&self, player: usize) -> Option<&Scorecard> {
        self.scorecards.get(player)
    }

    /// Dice as left by the last roll; a new turn starts from them.
    pub fn dice(&self) -> &Dice {
        &self.dice
    }

    pub fn set_dice(&mut self, dice: Dice) {
        self.dice = dice;
    }

    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Borrows the acting player's scorecard together with the dice generator.
    pub fn turn_parts(&mut self) -> Option<(&mut Scorecard, &mut StdRng)> {
        let card = self.scorecards.get_mut(self.current_player)?;
        Some((card, &mut self.rng))
    }

    pub fn is_finished(&self) -> bool {
        self.scorecards.is_empty() || self.round_number > ROUNDS_PER_GAME
    }

    /// Moves to the next player, wrapping into the next round.
    pub fn advance(&mut self) {
        if self.scorecards.is_empty() {
            return;
        }
        self.current_player += 1;
        if self.current_player >= self.scorecards.len() {
            self.current_player = 0;
            self.round_number = self.round_number.saturating_add(1);
        }
    }

    /// Player indices ordered by total, highest first; seating order breaks ties.
    pub fn standings(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.scorecards.len()).collect();
        order.sort_by_key(|&idx| std::cmp::Reverse(self.scorecards[idx].total()));
        order
    }

    pub fn winner(&self) -> Option<&Scorecard> {
        self.standings()
            .first()
            .and_then(|&idx| self.scorecards.get(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::{MatchState, ROUNDS_PER_GAME};
    use crate::model::category::Category;
    use crate::model::dice::Dice;
    use rand::Rng;

    fn dice(faces: [u8; 5]) -> Dice {
        Dice::new(faces).expect("valid dice")
    }

    #[test]
    fn new_match_starts_at_round_one() {
        let state = MatchState::with_seed(["Alice", "Bob"], 0);
        assert_eq!(state.round_number(), 1);
        assert_eq!(state.current_player(), 0);
        assert_eq!(state.player_count(), 2);
        assert_eq!(state.dice(), &Dice::initial());
        assert!(!state.is_finished());
    }

    #[test]
    fn advance_wraps_into_next_round() {
        let mut state = MatchState::with_seed(["a", "b", "c"], 0);
        state.advance();
        state.advance();
        assert_eq!(state.current_player(), 2);
        assert_eq!(state.round_number(), 1);
        state.advance();
        assert_eq!(state.current_player(), 0);
        assert_eq!(state.round_number(), 2);
    }

    #[test]
    fn finishes_after_thirteen_rounds() {
        let mut state = MatchState::with_seed(["solo"], 0);
        for _ in 0..ROUNDS_PER_GAME {
            assert!(!state.is_finished());
            state.advance();
        }
        assert!(state.is_finished());
    }

    #[test]
    fn match_seed_drives_rng() {
        let mut a = MatchState::with_seed(["p"], 1234);
        let mut b = MatchState::with_seed(["p"], 1234);
        assert_eq!(a.seed(), 1234);
        let x: u64 = a.rng_mut().r#gen();
        let y: u64 = b.rng_mut().r#gen();
        assert_eq!(x, y);
    }

    #[test]
    fn standings_sort_by_total_with_stable_ties() {
        let mut state = MatchState::with_seed(["a", "b", "c"], 0);
        {
            let (card, _) = state.turn_parts().unwrap();
            card.record(Category::Chance, &dice([1, 1, 1, 2, 2])).unwrap();
        }
        state.advance();
        {
            let (card, _) = state.turn_parts().unwrap();
            card.record(Category::Yahtzee, &dice([3, 3, 3, 3, 3])).unwrap();
        }
        state.advance();
        {
            let (card, _) = state.turn_parts().unwrap();
            card.record(Category::Chance, &dice([1, 1, 1, 2, 2])).unwrap();
        }
        assert_eq!(state.standings(), vec![1, 0, 2]);
        assert_eq!(state.winner().map(|c| c.name()), Some("b"));
    }
}
