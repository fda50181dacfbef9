use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::DEFAULT_SPLIT_SIZE;

pub const ENV_DB_PATH: &str = "SENTIMENT_DB_PATH";
pub const ENV_SPLIT_SIZE: &str = "SENTIMENT_SPLIT_SIZE";
pub const ENV_SCORING_WORKERS: &str = "SENTIMENT_SCORING_WORKERS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub default_split_size: i64,
    pub scoring_workers: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("sentiment.db"),
            default_split_size: DEFAULT_SPLIT_SIZE,
            scoring_workers: 1,
        }
    }
}

impl AppConfig {
    /// Reads the JSON file at `path` when it exists, then applies environment
    /// overrides. Fields missing from the file keep their defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, |key| env::var(key).ok())
    }

    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) if path.exists() => {
                let contents = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config from {}", path.display()))?;
                serde_json::from_str(&contents)
                    .with_context(|| format!("Failed to parse config at {}", path.display()))?
            }
            _ => AppConfig::default(),
        };

        config.apply_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DB_PATH).filter(|value| !value.trim().is_empty()) {
            self.database_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup(ENV_SPLIT_SIZE) {
            self.default_split_size = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_SPLIT_SIZE} is not an integer: '{raw}'"))?;
        }
        if let Some(raw) = lookup(ENV_SCORING_WORKERS) {
            self.scoring_workers = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_SCORING_WORKERS} is not a count: '{raw}'"))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_split_size < 1 {
            bail!(
                "default_split_size must be at least 1, got {}",
                self.default_split_size
            );
        }
        if self.scoring_workers == 0 {
            bail!("scoring_workers must be at least 1");
        }
        Ok(())
    }
}
