//! Opt-in [`tracing`] backend.
//!
//! The widget only emits `tracing` events; hosts that already install a subscriber get them for
//! free. [`try_init_tracing`] is a convenience for hosts that don't:
//!
//! - console output goes to stderr, filtered by `RUST_LOG` when set, otherwise `debug` when
//!   `EXPANDABLE_TEXT_DEBUG=1` and `warn` otherwise;
//! - `EXPANDABLE_TEXT_WRITE_LOG=<path>` additionally writes every event, unfiltered and without
//!   ANSI styling, to that file.

use std::fs::File;
use std::path::PathBuf;

use thiserror::Error;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::EnvConfig;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled(#[from] SetGlobalDefaultError),
}

pub fn default_level(config: &EnvConfig) -> LevelFilter {
    if config.debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
}

pub fn try_init_tracing(config: &EnvConfig) -> Result<(), LoggingError> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level(config).into())
        .with_env_var("RUST_LOG")
        .from_env_lossy();

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(env_filter);

    let log_file_layer = match config.write_log.as_deref() {
        Some(path) => {
            let file = File::create(path).map_err(|source| LoggingError::LogFile {
                path: PathBuf::from(path),
                source,
            })?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(file)
                    .with_ansi(false),
            )
        }
        None => None,
    };

    let registry = tracing_subscriber::registry()
        .with(console_layer)
        .with(log_file_layer);
    tracing::subscriber::set_global_default(registry)?;
    Ok(())
}
