//! Configuration for the session pipeline

use crate::error::Result;
use crate::stats::DEFAULT_CANONICAL_MINUTES;
use focusboard_store::Paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_HISTORY_API: &str = "https://hackhour.hackclub.com";
/// Bucket count of the session duration histogram
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

/// Pipeline configuration.
///
/// Loaded from `config.json`; secrets are only ever taken from the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Persisted session file (defaults to `<home>/sessions.csv`)
    pub data_file: Option<PathBuf>,

    /// Session length treated as canonical and skipped by variance charts
    pub canonical_length_minutes: u32,

    /// Bucket count of the session duration histogram
    pub histogram_bins: usize,

    /// Base URL of the session history API
    pub history_api_base: String,

    /// Account whose history is ingested
    pub user_id: Option<String>,

    /// Outbound message relay endpoint
    pub relay_url: Option<String>,

    /// Sender address for dispatched reports
    pub sender: Option<String>,

    /// Bearer token for the history API (`FOCUSBOARD_API_TOKEN`)
    #[serde(skip)]
    pub api_token: Option<String>,

    /// Bearer token for the relay (`FOCUSBOARD_RELAY_TOKEN`)
    #[serde(skip)]
    pub relay_token: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            data_file: None,
            canonical_length_minutes: DEFAULT_CANONICAL_MINUTES,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            history_api_base: DEFAULT_HISTORY_API.to_string(),
            user_id: None,
            relay_url: None,
            sender: None,
            api_token: None,
            relay_token: None,
        }
    }

    /// Load `path` (defaults when missing) and apply environment overrides
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            serde_json::from_str(&contents)?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Self::new()
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `FOCUSBOARD_*` overrides read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(file) = lookup("FOCUSBOARD_DATA_FILE") {
            self.data_file = Some(PathBuf::from(file));
        }
        if let Some(user) = lookup("FOCUSBOARD_USER_ID") {
            self.user_id = Some(user);
        }
        if let Some(token) = lookup("FOCUSBOARD_API_TOKEN") {
            self.api_token = Some(token);
        }
        if let Some(token) = lookup("FOCUSBOARD_RELAY_TOKEN") {
            self.relay_token = Some(token);
        }
    }

    pub fn data_file(&self, paths: &Paths) -> PathBuf {
        self.data_file.clone().unwrap_or_else(|| paths.data_file())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
