//! Structured Logger
//!
//! Wraps `tracing` with console output (human or JSON), optional daily
//! rotated NDJSON files, and environment-based level control.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE_PREFIX: &str = "a11yforge.log";

#[derive(Debug, Clone)]
pub struct LoggerOptions {
    /// Filter used when `RUST_LOG` is unset
    pub level: String,
    /// Emit console logs as JSON lines
    pub json: bool,
    /// Directory for rolling NDJSON log files
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            log_dir: None,
        }
    }
}

/// Initialize the global structured logger.
///
/// Console output goes to stderr so reports written to stdout stay clean.
/// Calling this more than once keeps the first subscriber.
pub fn init_logger(options: &LoggerOptions) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&options.level));

    // Rolling file appender: writes NDJSON to `<dir>/a11yforge.log.YYYY-MM-DD`
    let file_layer = match &options.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .json()
                    .with_writer(file_appender)
                    .with_ansi(false),
            )
        }
        None => None,
    };

    let json_console = options.json.then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_ansi(false)
    });
    let human_console = (!options.json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(true)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_console)
        .with(human_console)
        .with(file_layer)
        .try_init();
    Ok(())
}
