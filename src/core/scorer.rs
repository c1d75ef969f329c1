//! Sentiment scorer seam and the lexicon (VADER) scorer
//!
//! The combiner only sees `SentimentScorer`, so either model can be swapped
//! without touching it.

use vader_sentiment::SentimentIntensityAnalyzer;
use crate::types::SentimentScores;

/// A text → polarity model producing a value in [-1, 1]
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> f64;

    /// Proportion breakdown; models without one report only the compound
    fn breakdown(&self, text: &str) -> SentimentScores {
        SentimentScores {
            compound: self.score(text),
            ..SentimentScores::default()
        }
    }
}

/// Lexicon scorer backed by VADER
///
/// Text must be passed raw: VADER reads punctuation, capitalization,
/// negations and intensifiers.
pub struct LexiconScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LexiconScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LexiconScorer").finish_non_exhaustive()
    }
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Full VADER breakdown
    pub fn polarity_scores(&self, text: &str) -> SentimentScores {
        if text.trim().is_empty() {
            return SentimentScores::default();
        }

        let scores = self.analyzer.polarity_scores(text);
        let get = |key: &str| scores.get(key).copied().unwrap_or(0.0);

        SentimentScores {
            neg: get("neg"),
            neu: get("neu"),
            pos: get("pos"),
            compound: get("compound").clamp(-1.0, 1.0),
        }
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        self.polarity_scores(text).compound
    }

    fn breakdown(&self, text: &str) -> SentimentScores {
        self.polarity_scores(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_zero() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.polarity_scores("   "), SentimentScores::default());
        assert_eq!(scorer.score(""), 0.0);
    }

    #[test]
    fn test_polarity_direction() {
        let scorer = LexiconScorer::new();
        assert!(scorer.score("I was so happy and everything felt wonderful") > 0.3);
        assert!(scorer.score("It was a horrible, terrifying nightmare") < -0.3);
    }

    #[test]
    fn test_compound_bounded() {
        let scorer = LexiconScorer::new();
        let text = "great great great amazing wonderful love love love!!!";
        let c = scorer.score(text);
        assert!((-1.0..=1.0).contains(&c));
    }
}
