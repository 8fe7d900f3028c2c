//! Subscriber setup
//!
//! Console output is always on. With `logging.local_enabled` a second layer
//! writes one JSON object per event to a rotating file under `local_path`.

use crate::config::LoggingConfig;
use crate::domain::{FichaError, Result};
use std::str::FromStr;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// File name prefix of the rotated log files
pub const LOG_FILE_PREFIX: &str = "ficha-api.log";

/// Keeps the file writer's worker thread alive
///
/// Dropping it flushes pending file output, so hold it until exit.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard(Option<WorkerGuard>);

impl LoggingGuard {
    /// Whether events are also written to a log file
    pub fn writes_file(&self) -> bool {
        self.0.is_some()
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` overrides the computed filter when set.
///
/// # Errors
///
/// Fails on an unknown level, an unusable log directory, or when a global
/// subscriber is already installed.
///
/// # Example
///
/// ```no_run
/// use ficha::logging::init_logging;
/// use ficha::config::LoggingConfig;
///
/// let _guard = init_logging("info", &LoggingConfig::default()).unwrap();
/// ```
pub fn init_logging(log_level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let level = parse_log_level(log_level)?;
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level));

    let console = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(true)
        .with_filter(filter())
        .boxed();

    let (file, guard) = if config.local_enabled {
        std::fs::create_dir_all(&config.local_path).map_err(|e| {
            FichaError::Configuration(format!(
                "Failed to create log directory {}: {e}",
                config.local_path
            ))
        })?;

        let appender = RollingFileAppender::new(
            rotation_for(&config.local_rotation),
            &config.local_path,
            LOG_FILE_PREFIX,
        );
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_writer(writer)
            .with_filter(filter())
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init()
        .map_err(|e| FichaError::Configuration(format!("Failed to initialize logging: {e}")))?;

    if config.local_enabled {
        tracing::debug!(
            path = %config.local_path,
            rotation = %config.local_rotation,
            "File logging enabled"
        );
    }

    Ok(LoggingGuard(guard))
}

/// Crate and HTTP-layer events at `level`; pool and driver chatter only from warn
fn default_filter(level: Level) -> EnvFilter {
    EnvFilter::new(format!(
        "warn,ficha={level},tower_http={level},deadpool_postgres=warn,tokio_postgres=warn"
    ))
}

fn parse_log_level(raw: &str) -> Result<Level> {
    Level::from_str(raw.trim()).map_err(|_| {
        FichaError::Configuration(format!(
            "Invalid log level: {raw}. Must be one of: trace, debug, info, warn, error"
        ))
    })
}

/// Unknown values fall back to daily; configuration validation rejects them earlier
fn rotation_for(raw: &str) -> Rotation {
    match raw {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}
