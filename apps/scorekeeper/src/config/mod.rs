//! Runtime configuration read from the environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::rules::{DEFAULT_INTEGRITY_INTERVAL, DEFAULT_SCORE_LIMIT};
use crate::error::AppError;

pub const STORAGE_PATH_VAR: &str = "SCOREKEEPER_STORAGE_PATH";
pub const SCORE_LIMIT_VAR: &str = "SCOREKEEPER_SCORE_LIMIT";
pub const INTEGRITY_INTERVAL_VAR: &str = "SCOREKEEPER_INTEGRITY_INTERVAL_SECS";

const DEFAULT_STORAGE_PATH: &str = "scorekeeper-game.json";

#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Location of the persisted game slot.
    pub storage_path: PathBuf,
    /// Limit used by `create_game` when none is given.
    pub score_limit: i32,
    /// Period of the background integrity sweep.
    pub integrity_interval: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            score_limit: DEFAULT_SCORE_LIMIT,
            integrity_interval: DEFAULT_INTEGRITY_INTERVAL,
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source; unset variables take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let storage_path = lookup(STORAGE_PATH_VAR)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.storage_path);

        let score_limit = match lookup(SCORE_LIMIT_VAR) {
            Some(raw) => parse_positive::<i32>(SCORE_LIMIT_VAR, &raw)?,
            None => defaults.score_limit,
        };

        let integrity_interval = match lookup(INTEGRITY_INTERVAL_VAR) {
            Some(raw) => Duration::from_secs(parse_positive::<u64>(INTEGRITY_INTERVAL_VAR, &raw)?),
            None => defaults.integrity_interval,
        };

        Ok(Self {
            storage_path,
            score_limit,
            integrity_interval,
        })
    }
}

fn parse_positive<T>(name: &str, raw: &str) -> Result<T, AppError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => Ok(value),
        _ => Err(AppError::config(format!(
            "Environment variable '{name}' must be a positive integer, got '{raw}'"
        ))),
    }
}
