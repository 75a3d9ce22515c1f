use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::Level;
use yacht_bot::{BotDifficulty, SimulationParams};

const DEFAULT_TURN_START_MS: u64 = 2_000;
const DEFAULT_DECISION_MS: u64 = 1_000;
const DEFAULT_SCORE_MS: u64 = 2_000;
const DEFAULT_LEADERBOARD_SIZE: usize = 10;

/// Root application configuration loaded from YAML. Every block is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: AppConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.simulation.validate()?;
        self.store.validate()?;
        self.logging.normalize();
        self.logging.validate()?;
        Ok(())
    }

    /// Forces both simulated tiers to the same trial count.
    pub fn override_trials(&mut self, trials: u32) {
        self.simulation.normal_trials = trials;
        self.simulation.hard_trials = trials;
    }

    /// Turns off every pacing delay.
    pub fn disable_pacing(&mut self) {
        self.pacing = PacingConfig::instant();
    }
}

/// Monte Carlo trial counts per simulated tier.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct SimulationConfig {
    #[serde(default = "default_trials")]
    pub normal_trials: u32,
    #[serde(default = "default_trials")]
    pub hard_trials: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            normal_trials: default_trials(),
            hard_trials: default_trials(),
        }
    }
}

impl SimulationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("simulation.normal_trials", self.normal_trials),
            ("simulation.hard_trials", self.hard_trials),
        ] {
            if value == 0 {
                return Err(ValidationError::InvalidField {
                    field: field.to_string(),
                    message: "trial count must be greater than zero".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Simulation parameters for an AI tier; Easy never simulates.
    pub fn params_for(&self, difficulty: BotDifficulty) -> SimulationParams {
        match difficulty {
            BotDifficulty::Hard => SimulationParams::new(self.hard_trials),
            BotDifficulty::Normal | BotDifficulty::Easy => {
                SimulationParams::new(self.normal_trials)
            }
        }
    }
}

fn default_trials() -> u32 {
    SimulationParams::DEFAULT_TRIALS
}

/// Display delays around AI turns, in milliseconds.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct PacingConfig {
    #[serde(default = "default_turn_start_ms")]
    pub turn_start_ms: u64,
    #[serde(default = "default_decision_ms")]
    pub decision_ms: u64,
    #[serde(default = "default_score_ms")]
    pub score_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            turn_start_ms: DEFAULT_TURN_START_MS,
            decision_ms: DEFAULT_DECISION_MS,
            score_ms: DEFAULT_SCORE_MS,
        }
    }
}

impl PacingConfig {
    pub const fn instant() -> Self {
        Self {
            turn_start_ms: 0,
            decision_ms: 0,
            score_ms: 0,
        }
    }

    pub fn turn_start(&self) -> Duration {
        Duration::from_millis(self.turn_start_ms)
    }

    pub fn decision(&self) -> Duration {
        Duration::from_millis(self.decision_ms)
    }

    pub fn score(&self) -> Duration {
        Duration::from_millis(self.score_ms)
    }
}

fn default_turn_start_ms() -> u64 {
    DEFAULT_TURN_START_MS
}

fn default_decision_ms() -> u64 {
    DEFAULT_DECISION_MS
}

fn default_score_ms() -> u64 {
    DEFAULT_SCORE_MS
}

/// Location and leaderboard length of the persisted scores.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
        }
    }
}

impl StoreConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "store.path".to_string(),
                message: "path must not be empty".to_string(),
            });
        }
        if self.leaderboard_size == 0 {
            return Err(ValidationError::InvalidField {
                field: "store.leaderboard_size".to_string(),
                message: "leaderboard size must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("yacht_scores.jsonl")
}

fn default_leaderboard_size() -> usize {
    DEFAULT_LEADERBOARD_SIZE
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default = "default_log_path")]
    pub path: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            path: default_log_path(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.tracing_level".to_string(),
                message: format!("unknown tracing level '{}'", self.tracing_level),
            });
        }
        Ok(())
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn default_log_path() -> PathBuf {
    PathBuf::from("yacht.log.jsonl")
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FULL_YAML: &str = r#"
simulation:
  normal_trials: 500
  hard_trials: 4000
pacing:
  turn_start_ms: 0
  decision_ms: 250
  score_ms: 0
store:
  path: "scores/board.jsonl"
  leaderboard_size: 5
logging:
  enable_structured: true
  tracing_level: "debug"
  path: "logs/yacht.jsonl"
"#;

    #[test]
    fn loads_and_validates_full_config() {
        let mut cfg: AppConfig = serde_yaml::from_str(FULL_YAML).expect("parse yaml");
        cfg.validate().expect("validate");

        assert_eq!(cfg.simulation.params_for(BotDifficulty::Normal).trials(), 500);
        assert_eq!(cfg.simulation.params_for(BotDifficulty::Hard).trials(), 4000);
        assert_eq!(cfg.pacing.decision(), Duration::from_millis(250));
        assert_eq!(cfg.store.path, PathBuf::from("scores/board.jsonl"));
        assert_eq!(cfg.store.leaderboard_size, 5);
        assert!(cfg.logging.enable_structured);
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));
    }

    #[test]
    fn missing_blocks_fall_back_to_defaults() {
        let mut cfg: AppConfig = serde_yaml::from_str("pacing:\n  score_ms: 10\n").expect("parse");
        cfg.validate().expect("validate");
        assert_eq!(cfg.simulation, SimulationConfig::default());
        assert_eq!(cfg.pacing.turn_start_ms, DEFAULT_TURN_START_MS);
        assert_eq!(cfg.pacing.score_ms, 10);
        assert_eq!(cfg.store.leaderboard_size, DEFAULT_LEADERBOARD_SIZE);
        assert!(!cfg.logging.enable_structured);
    }

    #[test]
    fn rejects_zero_trials() {
        let yaml = FULL_YAML.replace("hard_trials: 4000", "hard_trials: 0");
        let mut cfg: AppConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("zero trials should fail");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "simulation.hard_trials"
        ));
    }

    #[test]
    fn rejects_zero_leaderboard_and_empty_path() {
        let yaml = FULL_YAML.replace("leaderboard_size: 5", "leaderboard_size: 0");
        let mut cfg: AppConfig = serde_yaml::from_str(&yaml).expect("parse");
        assert!(matches!(
            cfg.validate(),
            Err(ValidationError::InvalidField { field, .. }) if field == "store.leaderboard_size"
        ));

        let yaml = FULL_YAML.replace("\"scores/board.jsonl\"", "\"\"");
        let mut cfg: AppConfig = serde_yaml::from_str(&yaml).expect("parse");
        assert!(matches!(
            cfg.validate(),
            Err(ValidationError::InvalidField { field, .. }) if field == "store.path"
        ));
    }

    #[test]
    fn rejects_unknown_level_and_normalizes_blank() {
        let yaml = FULL_YAML.replace("\"debug\"", "\"loud\"");
        let mut cfg: AppConfig = serde_yaml::from_str(&yaml).expect("parse");
        assert!(matches!(
            cfg.validate(),
            Err(ValidationError::InvalidField { field, .. }) if field == "logging.tracing_level"
        ));

        let yaml = FULL_YAML.replace("\"debug\"", "\"  \"");
        let mut cfg: AppConfig = serde_yaml::from_str(&yaml).expect("parse");
        cfg.validate().expect("blank level falls back to info");
        assert_eq!(cfg.logging.level(), Some(Level::INFO));
    }

    #[test]
    fn trial_override_applies_to_both_tiers() {
        let mut cfg = AppConfig::default();
        cfg.override_trials(64);
        assert_eq!(cfg.simulation.normal_trials, 64);
        assert_eq!(cfg.simulation.hard_trials, 64);
    }

    #[test]
    fn from_path_reports_the_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"simulation: [not, a, map]\n").expect("write");
        let err = AppConfig::from_path(file.path()).expect_err("bad yaml");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), file.path());

        let missing = file.path().with_extension("missing");
        let err = AppConfig::from_path(&missing).expect_err("missing file");
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
