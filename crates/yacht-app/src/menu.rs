use crate::config::AppConfig;
use crate::controller::{GameController, GameError, PlayerSpec};
use crate::render;
use crate::store::ScoreStore;
use std::io::{BufRead, Write};
use std::ops::RangeInclusive;
use tracing::warn;
use yacht_bot::BotDifficulty;
use yacht_core::AppInfo;

/// Entries of the main menu, numbered as shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    LocalMultiplayer,
    VersusAi,
    Spectate,
    TopScores,
    Quit,
}

impl GameMode {
    pub const ALL: [GameMode; 5] = [
        GameMode::LocalMultiplayer,
        GameMode::VersusAi,
        GameMode::Spectate,
        GameMode::TopScores,
        GameMode::Quit,
    ];

    pub fn from_choice(choice: usize) -> Option<Self> {
        choice.checked_sub(1).and_then(|idx| Self::ALL.get(idx).copied())
    }

    pub const fn label(self) -> &'static str {
        match self {
            GameMode::LocalMultiplayer => "Local multiplayer (Player vs Player)",
            GameMode::VersusAi => "Play against AI (Player vs AI)",
            GameMode::Spectate => "Watch AI (AI vs AI)",
            GameMode::TopScores => "Top scores",
            GameMode::Quit => "Quit",
        }
    }
}

pub fn default_human_name(index: usize) -> String {
    format!("Player {}", index + 1)
}

pub fn default_computer_name(index: usize) -> String {
    format!("Computer {}", index + 1)
}

/// Interactive text menu that loops until the player quits or input ends.
pub struct Menu<'a, R, W> {
    config: &'a AppConfig,
    seed: Option<u64>,
    store: &'a mut dyn ScoreStore,
    input: R,
    output: W,
    games_played: u64,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(
        config: &'a AppConfig,
        seed: Option<u64>,
        store: &'a mut dyn ScoreStore,
        input: R,
        output: W,
    ) -> Self {
        Self {
            config,
            seed,
            store,
            input,
            output,
            games_played: 0,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn run(&mut self) -> Result<(), GameError> {
        loop {
            writeln!(
                self.output,
                "\n===== {}: {} v{} =====",
                AppInfo::name(),
                AppInfo::codename(),
                AppInfo::version()
            )?;
            writeln!(
                self.output,
                "Roll five dice up to three times, then fill each of the 13 categories once."
            )?;
            writeln!(self.output, "\n--- Game modes ---")?;
            for (idx, mode) in GameMode::ALL.iter().enumerate() {
                writeln!(self.output, "{}. {}", idx + 1, mode.label())?;
            }

            let Some(choice) = self.ask_number("Choose a mode: ", 1..=5)? else {
                return Ok(());
            };
            let players = match GameMode::from_choice(choice) {
                Some(GameMode::Quit) | None => return Ok(()),
                Some(GameMode::TopScores) => {
                    self.show_top_scores()?;
                    continue;
                }
                Some(GameMode::LocalMultiplayer) => {
                    let Some(humans) = self.ask_number("Number of players (1-5): ", 1..=5)? else {
                        return Ok(());
                    };
                    self.collect_players(humans, 0)?
                }
                Some(GameMode::VersusAi) => {
                    let Some(computers) = self.ask_number("Number of AI opponents (1-4): ", 1..=4)?
                    else {
                        return Ok(());
                    };
                    self.collect_players(1, computers)?
                }
                Some(GameMode::Spectate) => {
                    let Some(computers) = self.ask_number("Number of AI players (2-5): ", 2..=5)?
                    else {
                        return Ok(());
                    };
                    self.collect_players(0, computers)?
                }
            };
            let Some(players) = players else {
                return Ok(());
            };
            self.play(&players)?;
        }
    }

    fn play(&mut self, players: &[PlayerSpec]) -> Result<(), GameError> {
        let seed = self.seed.map(|seed| seed.wrapping_add(self.games_played));
        self.games_played += 1;
        let mut controller = GameController::new(
            players,
            seed,
            &self.config.simulation,
            self.config.pacing,
            &mut self.input,
            &mut self.output,
        );
        controller.play_match()?;
        controller.record_results(&mut *self.store)?;
        drop(controller);

        writeln!(self.output, "Press Enter to return to the menu...")?;
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(())
    }

    fn show_top_scores(&mut self) -> Result<(), GameError> {
        match self.store.top_scores(self.config.store.leaderboard_size) {
            Ok(entries) => write!(self.output, "{}", render::render_leaderboard(&entries))?,
            Err(err) => {
                warn!(target: "yacht_app::turn", error = %err, "leaderboard unavailable");
                writeln!(self.output, "Could not load scores: {err}")?;
            }
        }
        Ok(())
    }

    /// Humans first, then computers; `None` when input ends.
    fn collect_players(
        &mut self,
        humans: usize,
        computers: usize,
    ) -> Result<Option<Vec<PlayerSpec>>, GameError> {
        let mut players = Vec::with_capacity(humans + computers);
        for idx in 0..humans {
            write!(self.output, "Human player {} name: ", idx + 1)?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            let name = line.trim();
            let name = if name.is_empty() {
                default_human_name(idx)
            } else {
                name.to_string()
            };
            players.push(PlayerSpec::human(name));
        }
        for idx in 0..computers {
            let prompt = format!(
                "Computer {} difficulty (1: Easy, 2: Normal, 3: Hard): ",
                idx + 1
            );
            let Some(choice) = self.ask_number(&prompt, 1..=3)? else {
                return Ok(None);
            };
            let difficulty = BotDifficulty::ALL[choice - 1];
            players.push(PlayerSpec::computer(default_computer_name(idx), difficulty));
        }
        Ok(Some(players))
    }

    /// Re-prompts until a number in `range` is typed; `None` when input ends.
    fn ask_number(
        &mut self,
        prompt: &str,
        range: RangeInclusive<usize>,
    ) -> Result<Option<usize>, GameError> {
        write!(self.output, "{prompt}")?;
        loop {
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.trim().parse::<usize>() {
                Ok(value) if range.contains(&value) => return Ok(Some(value)),
                _ => write!(
                    self.output,
                    "Enter a number between {} and {}: ",
                    range.start(),
                    range.end()
                )?,
            }
        }
    }

    fn read_line(&mut self) -> Result<Option<String>, GameError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
