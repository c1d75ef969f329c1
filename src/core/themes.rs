//! Theme cluster miner: TF-IDF + seeded k-means over a user's dreams
//!
//! Fewer than `min_dreams` texts, or any internal failure, yields the
//! no-themes sentinel instead of an error.

use thiserror::Error;
use tracing::{info, debug, error};

use crate::InsightConfig;
use crate::core::tfidf::TfidfVectorizer;
use crate::core::kmeans::KMeans;
use crate::types::{InsightReason, ThemeCluster, ThemeResult};

/// Failures inside the miner. Never returned past `ThemeMiner::mine`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThemeError {
    #[error("no documents to vectorize")]
    NoDocuments,
    #[error("empty vocabulary; documents contain only stop words")]
    EmptyVocabulary,
    #[error("cannot form {k} clusters from {n} documents")]
    InvalidClusterCount { k: usize, n: usize },
    #[error("rows have different dimensions")]
    RaggedMatrix,
    #[error("could not fetch dreams: {0}")]
    Store(String),
}

/// Recurring theme miner
#[derive(Debug, Clone)]
pub struct ThemeMiner {
    max_features: usize,
    max_clusters: usize,
    top_terms: usize,
    seed: u64,
}

impl Default for ThemeMiner {
    fn default() -> Self {
        Self::from_config(&InsightConfig::default())
    }
}

impl ThemeMiner {
    pub fn from_config(config: &InsightConfig) -> Self {
        Self {
            max_features: config.max_features,
            max_clusters: config.max_clusters,
            top_terms: config.top_terms,
            seed: config.cluster_seed,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Mine themes, converting every failure into the sentinel
    pub fn mine(&self, texts: &[String], min_dreams: usize) -> ThemeResult {
        let n = texts.len();
        if n < min_dreams {
            debug!(dreams = n, min_dreams, "Not enough dreams for theme mining");
            return ThemeResult::none(InsightReason::R302_THEMES_INSUFFICIENT_DREAMS, n);
        }

        match self.try_mine(texts) {
            Ok(themes) => {
                info!(dreams = n, themes = themes.len(), "Recurring themes found");
                ThemeResult::found(themes, n)
            }
            Err(e) => {
                error!(error = %e, "Error finding recurring themes");
                ThemeResult::none(InsightReason::R303_THEMES_ERROR, n)
            }
        }
    }

    /// One cluster per non-empty k-means group, labelled by cluster index
    pub fn try_mine(&self, texts: &[String]) -> Result<Vec<ThemeCluster>, ThemeError> {
        let matrix = TfidfVectorizer::new(self.max_features).fit_transform(texts)?;
        let k = self.max_clusters.min(texts.len());
        let fit = KMeans::new(k, self.seed).fit(&matrix.rows)?;
        let sizes = fit.cluster_sizes();

        let themes = fit
            .centroids
            .iter()
            .enumerate()
            .filter(|(i, _)| sizes[*i] > 0)
            .map(|(i, centroid)| ThemeCluster {
                theme: format!("Theme {}", i + 1),
                keywords: top_terms(centroid, &matrix.vocabulary, self.top_terms),
                frequency: sizes[i],
            })
            .collect();

        Ok(themes)
    }
}

/// Highest-weighted terms of a centroid; ties keep vocabulary order
fn top_terms(centroid: &[f64], vocabulary: &[String], limit: usize) -> Vec<String> {
    let mut order: Vec<usize> = (0..centroid.len()).collect();
    order.sort_by(|&a, &b| {
        centroid[b]
            .partial_cmp(&centroid[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order
        .into_iter()
        .take(limit)
        .map(|i| vocabulary[i].clone())
        .collect()
}
