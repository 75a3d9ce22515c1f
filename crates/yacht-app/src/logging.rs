use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Keeps the background log writer alive; dropping it flushes pending lines.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    pub log_path: PathBuf,
}

/// Installs the JSON file subscriber when structured logging is enabled.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(logging: &LoggingConfig) -> Result<Option<LoggingGuard>> {
    if !logging.enable_structured {
        return Ok(None);
    }

    let log_path = logging.path.clone();
    if let Some(dir) = log_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating log directory at {}", dir.display()))?;
    }

    let file = File::options()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("opening log file at {}", log_path.display()))?;

    let (writer, guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(file);

    let level = logging.level().unwrap_or(Level::INFO);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .json()
        .with_current_span(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer)
        .finish();

    // A subscriber may already be installed when embedded in tests.
    let _ = tracing::subscriber::set_global_default(subscriber);

    Ok(Some(LoggingGuard {
        _guard: guard,
        log_path,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_logging_installs_nothing() {
        let cfg = LoggingConfig::default();
        assert!(init_logging(&cfg).expect("init").is_none());
    }

    #[test]
    fn enabled_logging_creates_the_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cfg = LoggingConfig {
            enable_structured: true,
            tracing_level: "debug".to_string(),
            path: dir.path().join("nested").join("yacht.jsonl"),
        };
        let guard = init_logging(&cfg).expect("init").expect("guard");
        assert!(guard.log_path.exists());
    }
}
