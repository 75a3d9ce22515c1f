use crate::config::{PacingConfig, SimulationConfig};
use crate::human::{HoldCommand, parse_category_choice, parse_hold_command};
use crate::render;
use crate::store::ScoreStore;
use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::{Level, event, warn};
use yacht_bot::{BotDifficulty, HoldDecision, Policy, PolicyContext};
use yacht_core::game::match_state::MatchState;
use yacht_core::game::turn::{TurnError, TurnState};
use yacht_core::model::category::Category;
use yacht_core::model::scorecard::{ScoreOutcome, Scorecard};
use yacht_core::model::scoring::{SpecialCombination, YAHTZEE_BONUS_SCORE};

/// Who sits in a seat before the match starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Computer(BotDifficulty),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSpec {
    pub name: String,
    pub kind: PlayerKind,
}

impl PlayerSpec {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PlayerKind::Human,
        }
    }

    pub fn computer(name: impl Into<String>, difficulty: BotDifficulty) -> Self {
        Self {
            name: name.into(),
            kind: PlayerKind::Computer(difficulty),
        }
    }
}

enum Seat {
    Human,
    Computer(Box<dyn Policy>),
}

impl Seat {
    fn is_human(&self) -> bool {
        matches!(self, Seat::Human)
    }
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("input closed before the game finished")]
    InputClosed,
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("illegal turn transition: {0}")]
    Turn(#[from] TurnError),
    #[error("{player} has no open category left")]
    NoOpenCategory { player: String },
}

/// Final total for one player, in standing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub name: String,
    pub total: u32,
}

/// Runs a match turn by turn, prompting humans on `input` and narrating to `output`.
pub struct GameController<R, W> {
    state: MatchState,
    seats: Vec<Seat>,
    pacing: PacingConfig,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> GameController<R, W> {
    pub fn new(
        players: &[PlayerSpec],
        seed: Option<u64>,
        simulation: &SimulationConfig,
        pacing: PacingConfig,
        input: R,
        output: W,
    ) -> Self {
        let names = players.iter().map(|p| p.name.clone());
        let state = match seed {
            Some(seed) => MatchState::with_seed(names, seed),
            None => MatchState::new(names),
        };
        let seats = players
            .iter()
            .map(|p| match p.kind {
                PlayerKind::Human => Seat::Human,
                PlayerKind::Computer(difficulty) => {
                    Seat::Computer(difficulty.create_policy(simulation.params_for(difficulty)))
                }
            })
            .collect();
        event!(
            target: "yacht_app::turn",
            Level::INFO,
            seed = state.seed(),
            players = players.len(),
            "match created"
        );
        Self {
            state,
            seats,
            pacing,
            input,
            output,
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Plays every remaining turn and returns the final standings.
    pub fn play_match(&mut self) -> Result<Vec<Standing>, GameError> {
        while !self.state.is_finished() {
            self.play_turn()?;
            self.state.advance();
        }
        let standings = self.standings();
        let order = self.state.standings();
        write!(self.output, "{}", render::render_final(self.state.scorecards(), &order))?;
        self.output.flush()?;
        Ok(standings)
    }

    pub fn standings(&self) -> Vec<Standing> {
        self.state
            .standings()
            .into_iter()
            .filter_map(|idx| self.state.scorecard(idx))
            .map(|card| Standing {
                name: card.name().to_string(),
                total: card.total(),
            })
            .collect()
    }

    /// Records every player's total. Failures are reported and the rest are skipped.
    pub fn record_results<S: ScoreStore + ?Sized>(
        &mut self,
        store: &mut S,
    ) -> Result<bool, GameError> {
        for standing in self.standings() {
            if let Err(err) = store.record_score(&standing.name, standing.total) {
                warn!(target: "yacht_app::turn", error = %err, "score not recorded");
                writeln!(self.output, "Scores were not recorded: {err}")?;
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// One full turn for the current player, from the first roll to the recorded score.
    pub fn play_turn(&mut self) -> Result<ScoreOutcome, GameError> {
        let player = self.state.current_player();
        let round = self.state.round_number();
        let name = self.current_card()?.name().to_string();
        let human = self.seats.get(player).is_some_and(Seat::is_human);
        let mut turn = TurnState::new(*self.state.dice());

        if human {
            writeln!(self.output, "{name}'s turn. Press Enter to roll...")?;
            self.output.flush()?;
            self.read_line()?;
        } else {
            writeln!(self.output, "{name}'s turn. Starting shortly...")?;
            pause(self.pacing.turn_start());
        }

        let combo = turn.roll(self.state.rng_mut())?;
        self.announce_roll(&turn, combo)?;

        while turn.can_roll() {
            let reroll = if human {
                self.human_hold(&mut turn, player, round)?
            } else {
                self.computer_hold(&mut turn, player, round)?
            };
            if !reroll {
                break;
            }
            let combo = turn.roll(self.state.rng_mut())?;
            self.announce_roll(&turn, combo)?;
        }
        turn.stop()?;

        let category = if human {
            self.human_category(&turn, player, round)?
        } else {
            writeln!(self.output, "{name} is choosing a category...")?;
            pause(self.pacing.score());
            self.computer_category(&turn, player, round)?
        };

        let (card, _) = self
            .state
            .turn_parts()
            .ok_or_else(|| GameError::NoOpenCategory { player: name.clone() })?;
        let outcome = turn.score(category, card)?;
        let total = card.total();
        self.state.set_dice(*turn.dice());

        event!(
            target: "yacht_app::turn",
            Level::INFO,
            player = %name,
            round,
            dice = %turn.dice(),
            category = %outcome.category,
            points = outcome.points,
            joker_bonus = outcome.joker_bonus,
            total,
            "score recorded"
        );

        writeln!(
            self.output,
            "{name} scored {} points in {}.",
            outcome.points, outcome.category
        )?;
        if outcome.joker_bonus {
            writeln!(self.output, "Yahtzee bonus! +{YAHTZEE_BONUS_SCORE}")?;
        }

        if human {
            writeln!(self.output, "Press Enter for the next player...")?;
            self.output.flush()?;
            self.read_line()?;
        } else {
            pause(self.pacing.score());
        }
        Ok(outcome)
    }

    fn current_card(&self) -> Result<&Scorecard, GameError> {
        self.state
            .scorecard(self.state.current_player())
            .ok_or_else(|| GameError::NoOpenCategory {
                player: format!("seat {}", self.state.current_player() + 1),
            })
    }

    fn announce_roll(
        &mut self,
        turn: &TurnState,
        combo: Option<SpecialCombination>,
    ) -> Result<(), GameError> {
        writeln!(
            self.output,
            "Rolled {} (rolls left: {})",
            turn.dice(),
            turn.rolls_left()
        )?;
        if let Some(combo) = combo {
            writeln!(self.output, "*** {combo} ***")?;
        }
        Ok(())
    }

    /// Reads commands until the player rerolls (`true`) or stops (`false`).
    fn human_hold(
        &mut self,
        turn: &mut TurnState,
        player: usize,
        round: u8,
    ) -> Result<bool, GameError> {
        loop {
            let board = render::render_turn(
                self.state.scorecards(),
                player,
                round,
                turn.rolls_left(),
                turn.dice(),
                turn.held(),
            );
            write!(self.output, "{board}[T]oggle, [R]eroll, [S]core: ")?;
            self.output.flush()?;
            let line = self.read_line()?;
            match parse_hold_command(&line) {
                Ok(HoldCommand::Toggle(positions)) => {
                    for pos in positions {
                        turn.toggle_hold(pos);
                    }
                }
                Ok(HoldCommand::Reroll) => return Ok(true),
                Ok(HoldCommand::Score) => return Ok(false),
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn human_category(
        &mut self,
        turn: &TurnState,
        player: usize,
        round: u8,
    ) -> Result<Category, GameError> {
        let board = render::render_turn(
            self.state.scorecards(),
            player,
            round,
            turn.rolls_left(),
            turn.dice(),
            turn.held(),
        );
        write!(self.output, "{board}")?;
        loop {
            write!(self.output, "Category number to score: ")?;
            self.output.flush()?;
            let line = self.read_line()?;
            let card = self.current_card()?;
            match parse_category_choice(&line, |c| card.is_used(c)) {
                Ok(category) => return Ok(category),
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn computer_hold(
        &mut self,
        turn: &mut TurnState,
        player: usize,
        round: u8,
    ) -> Result<bool, GameError> {
        pause(self.pacing.decision());
        let used = *self.current_card()?.used();
        let ctx = PolicyContext {
            dice: turn.dice(),
            used: &used,
            rolls_left: turn.rolls_left(),
            round,
        };
        let decision = match self.seats.get_mut(player) {
            Some(Seat::Computer(policy)) => policy.choose_hold(&ctx, self.state.rng_mut()),
            _ => HoldDecision::Stop,
        };
        match decision {
            HoldDecision::Stop => Ok(false),
            HoldDecision::Reroll(mask) => {
                turn.set_held(mask);
                if !mask.is_none() {
                    writeln!(self.output, "Holding {mask}")?;
                }
                Ok(true)
            }
        }
    }

    fn computer_category(
        &mut self,
        turn: &TurnState,
        player: usize,
        round: u8,
    ) -> Result<Category, GameError> {
        let card = self.current_card()?;
        let used = *card.used();
        let name = card.name().to_string();
        let ctx = PolicyContext {
            dice: turn.dice(),
            used: &used,
            rolls_left: turn.rolls_left(),
            round,
        };
        let chosen = match self.seats.get_mut(player) {
            Some(Seat::Computer(policy)) => policy.choose_category(&ctx),
            _ => None,
        };
        chosen
            .or_else(|| used.unused().next())
            .ok_or(GameError::NoOpenCategory { player: name })
    }

    fn read_line(&mut self) -> Result<String, GameError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(GameError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

fn pause(duration: Duration) {
    if !duration.is_zero() {
        thread::sleep(duration);
    }
}

/// Convenience for running a prompt-free AI match to completion.
pub fn run_spectate<W: Write>(
    players: &[PlayerSpec],
    seed: Option<u64>,
    simulation: &SimulationConfig,
    pacing: PacingConfig,
    output: W,
) -> Result<(Vec<Standing>, W), GameError> {
    let mut controller =
        GameController::new(players, seed, simulation, pacing, std::io::empty(), output);
    let standings = controller.play_match()?;
    Ok((standings, controller.into_output()))
}
