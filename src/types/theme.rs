//! Theme dictionary and theme clusters

use serde::{Deserialize, Serialize};
use crate::types::InsightReason;

/// Default theme table: keyword → hand-assigned emotional weight
pub const DEFAULT_THEMES: [(&str, f64); 9] = [
    ("flying", 0.8),
    ("falling", -0.4),
    ("chase", -0.6),
    ("water", 0.3),
    ("family", 0.5),
    ("death", -0.8),
    ("school", -0.2),
    ("work", -0.3),
    ("love", 0.7),
];

/// Immutable keyword → weight table, in declaration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<(String, f64)>", into = "Vec<(String, f64)>")]
pub struct ThemeDictionary {
    entries: Vec<(String, f64)>,
}

impl From<Vec<(String, f64)>> for ThemeDictionary {
    fn from(pairs: Vec<(String, f64)>) -> Self {
        Self::from_pairs(pairs)
    }
}

impl From<ThemeDictionary> for Vec<(String, f64)> {
    fn from(dict: ThemeDictionary) -> Self {
        dict.entries
    }
}

impl Default for ThemeDictionary {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_THEMES.iter().map(|(k, w)| (k.to_string(), *w)))
    }
}

impl ThemeDictionary {
    /// Build from (keyword, weight) pairs. Keywords are lowercased; a repeated
    /// keyword keeps its first weight.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, f64)>) -> Self {
        let mut entries: Vec<(String, f64)> = Vec::new();
        for (keyword, weight) in pairs {
            let keyword = keyword.to_lowercase();
            if !entries.iter().any(|(k, _)| *k == keyword) {
                entries.push((keyword, weight));
            }
        }
        Self { entries }
    }

    /// Weight for a keyword, if it is a theme
    pub fn weight(&self, keyword: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| k == keyword)
            .map(|(_, w)| *w)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, w)| (k.as_str(), *w))
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One recurring theme found by clustering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeCluster {
    /// "Theme i", 1-indexed by cluster number
    pub theme: String,
    /// Top centroid terms, at most three
    pub keywords: Vec<String>,
    /// Number of dreams in the cluster
    pub frequency: usize,
}

/// Outcome of a theme mining run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeResult {
    /// Clusters, or None for the no-themes sentinel
    pub themes: Option<Vec<ThemeCluster>>,
    pub reason: InsightReason,
    /// Number of texts considered
    pub dream_count: usize,
}

impl ThemeResult {
    pub fn found(themes: Vec<ThemeCluster>, dream_count: usize) -> Self {
        Self {
            themes: Some(themes),
            reason: InsightReason::R301_THEMES_FOUND,
            dream_count,
        }
    }

    pub fn none(reason: InsightReason, dream_count: usize) -> Self {
        Self {
            themes: None,
            reason,
            dream_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let dict = ThemeDictionary::default();
        assert_eq!(dict.len(), 9);
        assert_eq!(dict.weight("flying"), Some(0.8));
        assert_eq!(dict.weight("death"), Some(-0.8));
        assert_eq!(dict.weight("dragon"), None);
        assert_eq!(dict.keywords().next(), Some("flying"));
    }

    #[test]
    fn test_from_pairs_lowercases_and_dedups() {
        let dict = ThemeDictionary::from_pairs(vec![
            ("Ocean".to_string(), 0.4),
            ("ocean".to_string(), -0.9),
        ]);
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.weight("ocean"), Some(0.4));
    }

    #[test]
    fn test_dictionary_json_shape() {
        let dict: ThemeDictionary = serde_json::from_str(r#"[["Storm", -0.5], ["sun", 0.6]]"#).unwrap();
        assert_eq!(dict.weight("storm"), Some(-0.5));
        assert_eq!(dict.weight("sun"), Some(0.6));
    }
}
