//! Per-dream analysis results

use serde::{Deserialize, Serialize};
use crate::types::MoodLabel;

/// Lexicon scorer output: proportions plus the normalized compound value
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    /// Normalized polarity in [-1, 1], the only value the combiner consumes
    pub compound: f64,
}

/// The three raw signals fed into the combiner
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    /// Lexicon compound score (weight: 0.4)
    pub lexicon: f64,
    /// General polarity (weight: 0.3)
    pub polarity: f64,
    /// Theme affinity (weight: 0.3)
    pub theme: f64,
}

/// A word and how often it occurs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Detailed analysis of a single dream. Ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sentiment_scores: SentimentScores,
    pub components: ComponentScores,
    /// Combined score in [-1, 1]
    pub mood_score: f64,
    pub mood_label: MoodLabel,
    /// Theme keywords found in the cleaned text, dictionary order
    pub identified_themes: Vec<String>,
    /// Five most common words of the cleaned text
    pub common_words: Vec<WordCount>,
}
