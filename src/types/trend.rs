//! Trend report types

use serde::{Deserialize, Serialize};
use crate::types::{InsightReason, MoodBucket};

/// Direction of a user's mood over the lookback window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoodTrend {
    #[serde(rename = "improving")]
    Improving,
    #[serde(rename = "declining")]
    Declining,
    #[serde(rename = "stable")]
    Stable,
    /// Fewer than two scores, no slope to fit
    #[serde(rename = "neutral")]
    Neutral,
    #[serde(rename = "Error calculating trend")]
    Error,
}

impl MoodTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodTrend::Improving => "improving",
            MoodTrend::Declining => "declining",
            MoodTrend::Stable => "stable",
            MoodTrend::Neutral => "neutral",
            MoodTrend::Error => "Error calculating trend",
        }
    }
}

impl std::fmt::Display for MoodTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Most frequent mood bucket, or an explanatory sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DominantMood {
    #[serde(rename = "positive")]
    Positive,
    #[serde(rename = "negative")]
    Negative,
    #[serde(rename = "neutral")]
    Neutral,
    #[serde(rename = "No data available")]
    NoData,
    #[serde(rename = "Error determining dominant mood")]
    Error,
}

impl DominantMood {
    pub fn as_str(&self) -> &'static str {
        match self {
            DominantMood::Positive => "positive",
            DominantMood::Negative => "negative",
            DominantMood::Neutral => "neutral",
            DominantMood::NoData => "No data available",
            DominantMood::Error => "Error determining dominant mood",
        }
    }
}

impl From<MoodBucket> for DominantMood {
    fn from(bucket: MoodBucket) -> Self {
        match bucket {
            MoodBucket::Positive => DominantMood::Positive,
            MoodBucket::Negative => DominantMood::Negative,
            MoodBucket::Neutral => DominantMood::Neutral,
        }
    }
}

impl std::fmt::Display for DominantMood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Mood trend summary for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    /// Mean score, absent when there is no data or on error
    pub average_mood: Option<f64>,
    /// Fitted trend, absent when there is no data
    pub trend: Option<MoodTrend>,
    pub dominant_mood: DominantMood,
    /// Why the report looks the way it does
    pub reason: InsightReason,
}

impl TrendReport {
    /// No entries in the window
    pub fn no_data() -> Self {
        Self {
            average_mood: None,
            trend: None,
            dominant_mood: DominantMood::NoData,
            reason: InsightReason::R202_TREND_NO_DATA,
        }
    }

    /// Degraded result after an internal failure
    pub fn error() -> Self {
        Self {
            average_mood: None,
            trend: Some(MoodTrend::Error),
            dominant_mood: DominantMood::Error,
            reason: InsightReason::R204_TREND_ERROR,
        }
    }

    pub fn computed(average: f64, trend: MoodTrend, dominant: DominantMood, reason: InsightReason) -> Self {
        Self {
            average_mood: Some(average),
            trend: Some(trend),
            dominant_mood: dominant,
            reason,
        }
    }

    /// Has any mood data at all?
    pub fn has_data(&self) -> bool {
        self.reason != InsightReason::R202_TREND_NO_DATA
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_serialize_as_strings() {
        let json = serde_json::to_value(TrendReport::no_data()).unwrap();
        assert!(json["average_mood"].is_null());
        assert!(json["trend"].is_null());
        assert_eq!(json["dominant_mood"], "No data available");

        let json = serde_json::to_value(TrendReport::error()).unwrap();
        assert_eq!(json["trend"], "Error calculating trend");
        assert_eq!(json["dominant_mood"], "Error determining dominant mood");
    }
}
