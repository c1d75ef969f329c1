//! Journal-wide pattern summaries

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::types::InsightReason;

/// Month-level statistics over a user's dreams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSummary {
    pub total_dreams: usize,
    /// "YYYY-MM" → mean mood score of scored entries that month
    pub mood_trends: BTreeMap<String, f64>,
    /// "YYYY-MM" → number of dreams
    pub dreams_per_month: BTreeMap<String, usize>,
    /// Rounded to two decimals
    pub average_dreams_per_month: f64,
}

/// Label key ("very_positive", ...) → percentage of scored entries
pub type MoodDistribution = BTreeMap<String, f64>;

/// Pattern summary, distribution and report for one user, with a reason code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternResult {
    /// None when the journal is empty or could not be read
    pub summary: Option<PatternSummary>,
    pub distribution: MoodDistribution,
    pub report: String,
    pub reason: InsightReason,
}

impl PatternResult {
    pub fn computed(
        summary: Option<PatternSummary>,
        distribution: MoodDistribution,
        report: String,
        reason: InsightReason,
    ) -> Self {
        Self { summary, distribution, report, reason }
    }

    /// Degraded result after a store failure
    pub fn error() -> Self {
        Self {
            summary: None,
            distribution: MoodDistribution::new(),
            report: String::new(),
            reason: InsightReason::R403_PATTERNS_ERROR,
        }
    }
}
