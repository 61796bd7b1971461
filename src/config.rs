// ⚙️ Profile Configuration - Presentation policy as data
// Bucket boundaries and the vote-log display window are not algorithmic;
// they live in a JSON file and every field falls back to its default.

use crate::stats::StatsConfig;
use crate::votelog::JoinWindow;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Statistic buckets and missing-value policy (default: `StatsConfig::default()`)
    pub stats: StatsConfig,

    /// Vote-log display window (default: only logs with member choices)
    pub votelog_window: JoinWindow,
}

impl ProfileConfig {
    /// Load from a JSON file; missing keys take their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: ProfileConfig =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;

        tracing::debug!(
            age_buckets = config.stats.age_buckets.len(),
            asset_buckets = config.stats.asset_buckets.len(),
            "loaded profile config"
        );

        Ok(config)
    }
}
