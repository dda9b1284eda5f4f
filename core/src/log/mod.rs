//! Console logger setup on top of `log4rs`.
//!
//! Library crates of the workspace only emit records through the `log` facade; binaries,
//! benches and tests call [`init_logger`] or [`try_init_logger`] once to see them.

mod appender;
mod consts;
mod logger;

use appender::AppenderSpec;
use consts::{CONSOLE_APPENDER, DEFAULT_LOGGER_ENV, DEFAULT_LOGGER_FILTERS};
use log4rs::config::{Config, Root};
use logger::{Builder, Loggers};
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("Logger spec parsing error: {0}")]
    ParseLoggerSpecError(String),

    #[error("Logger configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    SetLoggerError(#[from] log::SetLoggerError),
}

pub type LogResult<T> = std::result::Result<T, LogError>;

/// Resolves the caller filters first and the environment filters second, so that the
/// environment overrides any target or root level both of them name
fn resolve_loggers(filters: &str, env_filters: &str) -> Loggers {
    let filters = if filters.trim().is_empty() { DEFAULT_LOGGER_FILTERS } else { filters };
    Builder::new().parse_expression(filters).parse_expression(env_filters).build()
}

fn build_config(filters: &str) -> LogResult<Config> {
    let loggers = resolve_loggers(filters, &env::var(DEFAULT_LOGGER_ENV).unwrap_or_default());
    Config::builder()
        .appender(AppenderSpec::console(CONSOLE_APPENDER, None).into_appender())
        .loggers(loggers.items())
        .build(Root::builder().appender(CONSOLE_APPENDER).build(loggers.root_level()))
        .map_err(|err| LogError::ConfigError(err.to_string()))
}

/// Installs the console logger. `filters` is a `RUST_LOG`-style expression (e.g.
/// `info,binheap=trace`) acting as the default. Whatever the `RUST_LOG` environment
/// variable sets takes precedence over it.
pub fn init_logger(filters: &str) -> LogResult<()> {
    log4rs::init_config(build_config(filters)?)?;
    Ok(())
}

/// Like [`init_logger`] but ignores failures, notably a logger already installed by
/// another test of the same process
pub fn try_init_logger(filters: &str) {
    let _ = init_logger(filters);
}
