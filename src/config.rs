//! Runtime configuration from `BLOCKFALL_*` environment variables.
//!
//! Malformed values never abort the game: they fall back to the default and
//! are reported with `log::warn!` once logging is up (see [`Config::warnings`]).

use std::path::PathBuf;

use log::LevelFilter;

use crate::types::FRAME_MS;

pub const ENV_SEED: &str = "BLOCKFALL_SEED";
pub const ENV_FRAME_MS: &str = "BLOCKFALL_FRAME_MS";
pub const ENV_LOG_PATH: &str = "BLOCKFALL_LOG_PATH";
pub const ENV_LOG_LEVEL: &str = "BLOCKFALL_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Fixed piece order when set; OS entropy otherwise
    pub seed: Option<u64>,
    /// Driver cadence in milliseconds
    pub frame_ms: f64,
    /// Log file; logging is off when `None`
    pub log_path: Option<PathBuf>,
    pub log_level: LevelFilter,
    warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            frame_ms: FRAME_MS,
            log_path: None,
            log_level: LevelFilter::Info,
            warnings: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(raw) = var(ENV_SEED) {
            match raw.parse() {
                Ok(seed) => config.seed = Some(seed),
                Err(_) => config.warn(ENV_SEED, &raw),
            }
        }

        if let Some(raw) = var(ENV_FRAME_MS) {
            match raw.parse::<f64>() {
                Ok(ms) if ms.is_finite() && ms > 0.0 => config.frame_ms = ms,
                _ => config.warn(ENV_FRAME_MS, &raw),
            }
        }

        config.log_path = var(ENV_LOG_PATH).map(PathBuf::from);

        if let Some(raw) = var(ENV_LOG_LEVEL) {
            match raw.parse() {
                Ok(level) => config.log_level = level,
                Err(_) => config.warn(ENV_LOG_LEVEL, &raw),
            }
        }

        config
    }

    fn warn(&mut self, key: &str, raw: &str) {
        self.warnings
            .push(format!("ignoring {key}={raw:?}, using the default"));
    }

    /// Problems found while reading the environment
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
