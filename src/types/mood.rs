//! Mood labels and mood buckets

use serde::{Deserialize, Serialize};
use crate::{
    LABEL_VERY_POSITIVE_MIN, LABEL_POSITIVE_MIN,
    LABEL_NEUTRAL_ABOVE, LABEL_NEGATIVE_ABOVE,
    DOMINANT_BUCKET_THRESHOLD,
};

/// The five ordinal mood categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MoodLabel {
    #[serde(rename = "Very Negative")]
    VeryNegative,
    #[serde(rename = "Negative")]
    Negative,
    #[serde(rename = "Neutral")]
    Neutral,
    #[serde(rename = "Positive")]
    Positive,
    #[serde(rename = "Very Positive")]
    VeryPositive,
}

impl MoodLabel {
    /// All labels, most positive first
    pub const ALL: [MoodLabel; 5] = [
        MoodLabel::VeryPositive,
        MoodLabel::Positive,
        MoodLabel::Neutral,
        MoodLabel::Negative,
        MoodLabel::VeryNegative,
    ];

    /// Classify a continuous score. Thresholds are inclusive lower bounds
    /// for the positive side and strict for the negative side.
    pub fn from_score(score: f64) -> Self {
        if score >= LABEL_VERY_POSITIVE_MIN {
            MoodLabel::VeryPositive
        } else if score >= LABEL_POSITIVE_MIN {
            MoodLabel::Positive
        } else if score > LABEL_NEUTRAL_ABOVE {
            MoodLabel::Neutral
        } else if score > LABEL_NEGATIVE_ABOVE {
            MoodLabel::Negative
        } else {
            MoodLabel::VeryNegative
        }
    }

    /// Human-readable label
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodLabel::VeryPositive => "Very Positive",
            MoodLabel::Positive => "Positive",
            MoodLabel::Neutral => "Neutral",
            MoodLabel::Negative => "Negative",
            MoodLabel::VeryNegative => "Very Negative",
        }
    }

    /// snake_case key used in distributions
    pub fn key(&self) -> &'static str {
        match self {
            MoodLabel::VeryPositive => "very_positive",
            MoodLabel::Positive => "positive",
            MoodLabel::Neutral => "neutral",
            MoodLabel::Negative => "negative",
            MoodLabel::VeryNegative => "very_negative",
        }
    }
}

impl std::fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse three-way bucket used for the dominant mood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodBucket {
    Positive,
    Negative,
    Neutral,
}

impl MoodBucket {
    /// negative: < -0.1, positive: > 0.1, neutral otherwise
    pub fn from_score(score: f64) -> Self {
        if score < -DOMINANT_BUCKET_THRESHOLD {
            MoodBucket::Negative
        } else if score > DOMINANT_BUCKET_THRESHOLD {
            MoodBucket::Positive
        } else {
            MoodBucket::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodBucket::Positive => "positive",
            MoodBucket::Negative => "negative",
            MoodBucket::Neutral => "neutral",
        }
    }
}
