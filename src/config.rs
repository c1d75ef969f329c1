//! Analysis configuration
//!
//! Defaults mirror the crate-level constants. A JSON file may override any
//! subset of fields:
//!
//! ```json
//! { "lookback_days": 14, "cluster_seed": 7, "themes": [["ocean", 0.4]] }
//! ```

use std::path::Path;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ThemeDictionary;
use crate::{
    DEFAULT_LOOKBACK_DAYS, DEFAULT_MIN_DREAMS, DEFAULT_CLUSTER_SEED,
    DEFAULT_MAX_FEATURES, DEFAULT_MAX_CLUSTERS, DEFAULT_TOP_TERMS,
};

/// Config loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Tunables for the insight pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Trend lookback window in days
    pub lookback_days: i64,
    /// Minimum dreams before theme mining
    pub min_dreams: usize,
    /// k-means++ seed
    pub cluster_seed: u64,
    /// TF-IDF vocabulary cap
    pub max_features: usize,
    /// Upper bound on k
    pub max_clusters: usize,
    /// Keywords per cluster
    pub top_terms: usize,
    /// Theme affinity table
    pub themes: ThemeDictionary,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            min_dreams: DEFAULT_MIN_DREAMS,
            cluster_seed: DEFAULT_CLUSTER_SEED,
            max_features: DEFAULT_MAX_FEATURES,
            max_clusters: DEFAULT_MAX_CLUSTERS,
            top_terms: DEFAULT_TOP_TERMS,
            themes: ThemeDictionary::default(),
        }
    }
}

impl InsightConfig {
    /// Load from a JSON file; missing fields fall back to defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: InsightConfig = serde_json::from_str(r#"{"lookback_days": 7}"#).unwrap();
        assert_eq!(config.lookback_days, 7);
        assert_eq!(config.cluster_seed, DEFAULT_CLUSTER_SEED);
        assert_eq!(config.themes, ThemeDictionary::default());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = InsightConfig::from_file("./no_such_dreamlog_config.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
