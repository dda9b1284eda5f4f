use super::LogError;
use log::LevelFilter;
use log4rs::config::Logger;
use std::{collections::BTreeMap, mem};

/// Resolved filters: one level per logging target plus the root level
pub(super) struct Loggers {
    loggers: BTreeMap<String, LevelFilter>,
    root_level: LevelFilter,
}

impl Loggers {
    pub fn root_level(&self) -> LevelFilter {
        self.root_level
    }

    #[cfg(test)]
    pub fn level_of(&self, target: &str) -> Option<LevelFilter> {
        self.loggers.get(target).copied()
    }

    pub fn items(&self) -> impl Iterator<Item = Logger> + '_ {
        self.loggers.iter().map(|(name, level)| Logger::builder().build(name.clone(), *level))
    }
}

/// Collects filters from `RUST_LOG`-style expressions such as `info,binheap=trace`.
/// Later specs override earlier ones.
#[derive(Default)]
pub(super) struct Builder {
    loggers: BTreeMap<String, LevelFilter>,
    root_level: Option<LevelFilter>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse_expression(&mut self, expression: &str) -> &mut Self {
        for spec in expression.split(',').map(str::trim).filter(|spec| !spec.is_empty()) {
            match parse_spec(spec) {
                Ok((None, level)) => {
                    self.root_level(level);
                }
                Ok((Some(target), level)) => {
                    self.logger(target, level);
                }
                // No logger is installed yet, so this can only go to stderr
                Err(err) => eprintln!("Ignoring invalid logging spec: {}", err),
            }
        }
        self
    }

    pub fn root_level(&mut self, level: LevelFilter) -> &mut Self {
        self.root_level = Some(level);
        self
    }

    pub fn logger(&mut self, target: &str, level: LevelFilter) -> &mut Self {
        self.loggers.insert(target.to_string(), level);
        self
    }

    pub fn build(&mut self) -> Loggers {
        Loggers { loggers: mem::take(&mut self.loggers), root_level: self.root_level.take().unwrap_or(LevelFilter::Error) }
    }
}

/// Parses a single `level`, `target` or `target=level` spec. A bare target enables every level for it.
fn parse_spec(spec: &str) -> Result<(Option<&str>, LevelFilter), LogError> {
    let mut parts = spec.split('=').map(str::trim);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(single), None, None) => match single.parse() {
            Ok(level) => Ok((None, level)),
            Err(_) => Ok((Some(single), LevelFilter::max())),
        },
        (Some(target), Some(""), None) if !target.is_empty() => Ok((Some(target), LevelFilter::max())),
        (Some(target), Some(level), None) if !target.is_empty() => {
            level.parse().map(|level| (Some(target), level)).map_err(|_| LogError::ParseLoggerSpecError(spec.to_string()))
        }
        _ => Err(LogError::ParseLoggerSpecError(spec.to_string())),
    }
}
