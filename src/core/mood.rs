//! Mood analyzer: three scorers → combined score → label
//!
//! final = 0.4 * lexicon + 0.3 * polarity + 0.3 * theme, clamped to [-1, 1]

use tracing::debug;

use crate::{WEIGHT_LEXICON, WEIGHT_POLARITY, WEIGHT_THEME};
use crate::core::scorer::{SentimentScorer, LexiconScorer};
use crate::core::polarity::PolarityScorer;
use crate::core::theme_affinity::{clean_text, ThemeAffinityScorer};
use crate::types::{AnalysisResult, ComponentScores, MoodLabel, ThemeDictionary, WordCount};

/// Number of words reported in `common_words`
const COMMON_WORDS: usize = 5;

/// Weighted average of the three component scores, clamped to [-1, 1]
pub fn combine(lexicon: f64, polarity: f64, theme: f64) -> f64 {
    (WEIGHT_LEXICON * lexicon + WEIGHT_POLARITY * polarity + WEIGHT_THEME * theme).clamp(-1.0, 1.0)
}

/// Most frequent words, count descending, ties in first-seen order
pub fn word_frequencies(cleaned: &str, limit: usize) -> Vec<WordCount> {
    let mut counts: Vec<WordCount> = Vec::new();
    for word in cleaned.split_whitespace() {
        match counts.iter_mut().find(|wc| wc.word == word) {
            Some(wc) => wc.count += 1,
            None => counts.push(WordCount { word: word.to_string(), count: 1 }),
        }
    }
    // stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

/// Scores dream text
pub struct MoodAnalyzer {
    lexicon: Box<dyn SentimentScorer>,
    polarity: Box<dyn SentimentScorer>,
    themes: ThemeAffinityScorer,
}

impl Default for MoodAnalyzer {
    fn default() -> Self {
        Self::new(ThemeDictionary::default())
    }
}

impl std::fmt::Debug for MoodAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoodAnalyzer")
            .field("themes", &self.themes)
            .finish_non_exhaustive()
    }
}

impl MoodAnalyzer {
    /// VADER lexicon + pattern polarity + the given theme table
    pub fn new(dictionary: ThemeDictionary) -> Self {
        Self::with_scorers(
            Box::new(LexiconScorer::new()),
            Box::new(PolarityScorer::new()),
            ThemeAffinityScorer::new(dictionary),
        )
    }

    /// Substitute either sentiment model
    pub fn with_scorers(
        lexicon: Box<dyn SentimentScorer>,
        polarity: Box<dyn SentimentScorer>,
        themes: ThemeAffinityScorer,
    ) -> Self {
        Self { lexicon, polarity, themes }
    }

    /// Raw component scores. Sentiment models see the raw text; the theme
    /// scorer sees cleaned text.
    pub fn components(&self, text: &str) -> ComponentScores {
        ComponentScores {
            lexicon: self.lexicon.score(text),
            polarity: self.polarity.score(text),
            theme: self.themes.score_cleaned(&clean_text(text)),
        }
    }

    /// The single score persisted per entry
    pub fn mood_score(&self, text: &str) -> f64 {
        let c = self.components(text);
        combine(c.lexicon, c.polarity, c.theme)
    }

    /// Map a score to its label
    pub fn label(&self, score: f64) -> MoodLabel {
        MoodLabel::from_score(score)
    }

    /// Detailed analysis. The combined score is computed once and reused for
    /// the label.
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let cleaned = clean_text(text);
        let sentiment_scores = self.lexicon.breakdown(text);

        let components = ComponentScores {
            lexicon: sentiment_scores.compound,
            polarity: self.polarity.score(text),
            theme: self.themes.score_cleaned(&cleaned),
        };
        let mood_score = combine(components.lexicon, components.polarity, components.theme);
        let mood_label = MoodLabel::from_score(mood_score);

        debug!(
            lexicon = components.lexicon,
            polarity = components.polarity,
            theme = components.theme,
            mood_score,
            "Dream analyzed"
        );

        AnalysisResult {
            sentiment_scores,
            components,
            mood_score,
            mood_label,
            identified_themes: self.themes.identify_themes(&cleaned),
            common_words: word_frequencies(&cleaned, COMMON_WORDS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed-output model for exercising the combiner in isolation
    struct Fixed(f64);

    impl SentimentScorer for Fixed {
        fn score(&self, _text: &str) -> f64 {
            self.0
        }
    }

    fn fixed_analyzer(lexicon: f64, polarity: f64) -> MoodAnalyzer {
        MoodAnalyzer::with_scorers(
            Box::new(Fixed(lexicon)),
            Box::new(Fixed(polarity)),
            ThemeAffinityScorer::default(),
        )
    }

    #[test]
    fn test_combine_weights() {
        let s = combine(0.5, -0.2, 0.2);
        assert!((s - (0.2 - 0.06 + 0.06)).abs() < 1e-10);
    }

    #[test]
    fn test_combine_bounded_over_grid() {
        let steps = [-1.0, -0.5, 0.0, 0.5, 1.0];
        for &a in &steps {
            for &b in &steps {
                for &c in &steps {
                    let s = combine(a, b, c);
                    assert!((-1.0..=1.0).contains(&s));
                    let expected = (0.4 * a + 0.3 * b + 0.3 * c).clamp(-1.0, 1.0);
                    assert!((s - expected).abs() < 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_combine_clamps_out_of_range_inputs() {
        assert_eq!(combine(3.0, 3.0, 3.0), 1.0);
        assert_eq!(combine(-3.0, -3.0, -3.0), -1.0);
    }

    #[test]
    fn test_substituted_scorers_feed_combiner() {
        let analyzer = fixed_analyzer(0.5, 0.5);
        // flying 0.8
        let score = analyzer.mood_score("flying over the sea");
        assert!((score - (0.2 + 0.15 + 0.24)).abs() < 1e-10);
    }

    #[test]
    fn test_analyze_reuses_one_score() {
        let analyzer = fixed_analyzer(1.0, 1.0);
        let result = analyzer.analyze("Love and flying!");
        // theme = mean(0.8, 0.7) = 0.75
        let expected = 0.4 + 0.3 + 0.3 * 0.75;
        assert!((result.mood_score - expected).abs() < 1e-10);
        assert_eq!(result.mood_label, MoodLabel::VeryPositive);
        assert_eq!(result.identified_themes, vec!["flying".to_string(), "love".to_string()]);
        assert_eq!(result.sentiment_scores.compound, 1.0);
    }

    #[test]
    fn test_word_frequencies_order() {
        let words = word_frequencies("b a b c a b d e f", 3);
        let flat: Vec<(&str, usize)> = words.iter().map(|w| (w.word.as_str(), w.count)).collect();
        assert_eq!(flat, vec![("b", 3), ("a", 2), ("c", 1)]);
    }

    #[test]
    fn test_real_models_direction() {
        let analyzer = MoodAnalyzer::default();
        let happy = analyzer.mood_score("I was flying over mountains and felt very happy");
        let grim = analyzer.mood_score("A terrible chase, then death. I was terrified and alone.");
        assert!(happy > 0.1, "happy dream scored {}", happy);
        assert!(grim < -0.1, "grim dream scored {}", grim);
    }
}
