//! Board configuration from the environment.

use log::warn;

use crate::palette::Palette;
use crate::types::{DEFAULT_COLUMNS, DEFAULT_ROWS, MAX_DIMENSION};

/// Board parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    pub palette: Palette,
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            palette: Palette::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    ///
    /// - `MATCH3_ROWS`, `MATCH3_COLUMNS`: board size (1 to [`MAX_DIMENSION`])
    /// - `MATCH3_SEED`: u64 seed for deterministic boards
    /// - `MATCH3_PALETTE`: comma separated color names
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let dim = |key: &str, default: usize| match lookup(key) {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(v) if (1..=MAX_DIMENSION).contains(&v) => v,
                _ => {
                    warn!("[Config] ignoring invalid {} {:?}", key, raw);
                    default
                }
            },
            None => default,
        };
        let rows = dim("MATCH3_ROWS", defaults.rows);
        let columns = dim("MATCH3_COLUMNS", defaults.columns);

        let seed = lookup("MATCH3_SEED").and_then(|s| s.trim().parse::<u64>().ok());

        let palette = match lookup("MATCH3_PALETTE") {
            Some(list) => Palette::parse(&list).unwrap_or_else(|| {
                warn!("[Config] ignoring invalid MATCH3_PALETTE {:?}", list);
                defaults.palette.clone()
            }),
            None => defaults.palette.clone(),
        };

        Self {
            rows,
            columns,
            palette,
            seed,
        }
    }
}
