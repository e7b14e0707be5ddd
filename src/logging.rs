// src/logging.rs
// =============================================================================
// Logging setup with tracing-subscriber.
//
// - Console: stderr, coloured, level chosen by the -v count
// - Log file (optional): plain text, level chosen by --log-level
//
// Both layers share one registry, so every tracing macro reaches both.
// =============================================================================

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, prelude::*};

use crate::cli::LogLevel;
use crate::error::CheckerError;

/// Console level for a given number of -v flags
pub fn console_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warning => LevelFilter::WARN,
            LogLevel::Error | LogLevel::Critical => LevelFilter::ERROR,
        }
    }
}

/// Builds the subscriber without installing it.
pub fn build_subscriber(
    verbosity: u8,
    log_file: Option<&Path>,
    file_level: LogLevel,
) -> Result<impl Subscriber + Send + Sync + 'static, CheckerError> {
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_level(verbosity));

    let file = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| CheckerError::Output {
                    path: path.to_path_buf(),
                    source,
                })?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .with_filter(LevelFilter::from(file_level)),
            )
        }
        None => None,
    };

    Ok(tracing_subscriber::registry().with(console).with(file))
}

/// Builds the subscriber and installs it for the whole process.
pub fn setup_logging(
    verbosity: u8,
    log_file: Option<&Path>,
    file_level: LogLevel,
) -> Result<(), CheckerError> {
    let subscriber = build_subscriber(verbosity, log_file, file_level)?;
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
