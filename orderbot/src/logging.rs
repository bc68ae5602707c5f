//! Tracing initialization.
//!
//! Console output goes to stderr so stdout only carries the result block.
//! The same events are appended, without ANSI colors, to the configured log
//! file.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{AppError, AppResult};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "orderbot=info";

/// Open (append) the log file.
pub fn open_log_file(path: &Path) -> AppResult<File> {
    OpenOptions::new().create(true).append(true).open(path).map_err(|e| {
        AppError::Config(format!("Cannot open log file {}: {}", path.display(), e))
    })
}

/// Install the global subscriber.
///
/// `RUST_LOG` overrides [`DEFAULT_FILTER`].
pub fn init(log_file: Option<&Path>) -> AppResult<()> {
    let file_layer = match log_file {
        Some(path) => Some(
            fmt::layer()
                .with_writer(Mutex::new(open_log_file(path)?))
                .with_ansi(false)
                .with_target(true),
        ),
        None => None,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .with(filter)
        .try_init()
        .map_err(|e| AppError::Config(format!("Cannot initialize logging: {}", e)))
}
