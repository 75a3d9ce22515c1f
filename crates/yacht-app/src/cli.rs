use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use yacht_bot::BotDifficulty;

use crate::config::AppConfig;
use crate::controller::{PlayerSpec, run_spectate};
use crate::logging::init_logging;
use crate::menu::{Menu, default_computer_name};
use crate::render;
use crate::store::{JsonlScoreStore, ScoreStore};

/// Terminal Yahtzee for up to five players, human or computer.
#[derive(Debug, Parser)]
#[command(
    name = "yacht",
    author,
    version,
    about = "Terminal Yahtzee with Easy, Normal and Hard AI players"
)]
pub struct Cli {
    /// Path to a YAML configuration file.
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Seed for the dice generator (reproducible games).
    #[arg(long, value_name = "SEED", global = true)]
    pub seed: Option<u64>,

    /// Override the score file location.
    #[arg(long, value_name = "FILE", global = true)]
    pub scores: Option<PathBuf>,

    /// Override Monte Carlo trials for both Normal and Hard players.
    #[arg(
        long,
        value_name = "COUNT",
        global = true,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub trials: Option<u32>,

    /// Skip the display delays around AI turns.
    #[arg(long, global = true)]
    pub no_pacing: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive menu (the default).
    Play,
    /// Watch computer players without any prompts.
    Watch {
        /// Number of AI players.
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(2..=5))]
        players: u8,
        /// Difficulty per player (easy, normal, hard or 1-3); the last one repeats.
        #[arg(long, value_name = "LEVEL", value_delimiter = ',')]
        difficulty: Vec<BotDifficulty>,
    },
    /// Print the leaderboard.
    Scores {
        /// Number of entries to show.
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
    },
}

impl Cli {
    /// Loads the config file (if any) and applies command-line overrides.
    pub fn resolve_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_path(path)?,
            None => AppConfig::default(),
        };
        if let Some(trials) = self.trials {
            config.override_trials(trials);
        }
        if let Some(path) = &self.scores {
            config.store.path = path.clone();
        }
        if self.no_pacing {
            config.disable_pacing();
        }
        config.validate()?;
        Ok(config)
    }
}

/// Expands the `--difficulty` list to one entry per seat.
pub fn watch_lineup(players: u8, difficulties: &[BotDifficulty]) -> Vec<PlayerSpec> {
    let fallback = difficulties
        .last()
        .copied()
        .unwrap_or_else(BotDifficulty::from_env);
    (0..players as usize)
        .map(|idx| {
            let difficulty = difficulties.get(idx).copied().unwrap_or(fallback);
            PlayerSpec::computer(default_computer_name(idx), difficulty)
        })
        .collect()
}

pub fn run(cli: Cli) -> Result<()> {
    let config = cli.resolve_config()?;
    let _logging_guard = init_logging(&config.logging)?;
    let mut store = JsonlScoreStore::new(config.store.path.clone());
    info!(
        target: "yacht_app::turn",
        scores = %store.path().display(),
        seed = ?cli.seed,
        "starting"
    );

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => {
            let stdin = io::stdin();
            let mut menu = Menu::new(&config, cli.seed, &mut store, stdin.lock(), io::stdout());
            menu.run().context("running interactive menu")?;
        }
        Command::Watch {
            players,
            difficulty,
        } => {
            let lineup = watch_lineup(players, &difficulty);
            let (standings, _) = run_spectate(
                &lineup,
                cli.seed,
                &config.simulation,
                config.pacing,
                io::stdout(),
            )
            .context("running AI match")?;
            for standing in &standings {
                if let Err(err) = store.record_score(&standing.name, standing.total) {
                    tracing::warn!(target: "yacht_app::turn", error = %err, "score not recorded");
                    eprintln!("Scores were not recorded: {err}");
                    break;
                }
            }
        }
        Command::Scores { limit } => {
            let limit = limit.unwrap_or(config.store.leaderboard_size);
            let entries = store
                .top_scores(limit)
                .with_context(|| format!("reading scores from {}", store.path().display()))?;
            let mut stdout = io::stdout().lock();
            write!(stdout, "{}", render::render_leaderboard(&entries))?;
        }
    }
    Ok(())
}
