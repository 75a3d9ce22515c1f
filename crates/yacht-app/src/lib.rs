pub mod cli;
pub mod config;
pub mod controller;
pub mod human;
pub mod logging;
pub mod menu;
pub mod render;
pub mod store;

pub use config::AppConfig;
pub use controller::{GameController, GameError, PlayerKind, PlayerSpec, Standing};
pub use store::{JsonlScoreStore, MemoryScoreStore, ScoreEntry, ScoreStore, StoreError};
