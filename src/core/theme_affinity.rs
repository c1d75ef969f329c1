//! Theme affinity: mean weight of dictionary keywords found in a dream

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::scorer::SentimentScorer;
use crate::types::ThemeDictionary;

lazy_static! {
    static ref RE_NON_ALPHA: Regex = Regex::new(r"[^a-zA-Z\s]").unwrap();
}

/// Strip everything but ASCII letters and whitespace, then lowercase
pub fn clean_text(text: &str) -> String {
    RE_NON_ALPHA.replace_all(text, "").to_lowercase()
}

/// Scores cleaned text against an immutable theme table
#[derive(Debug, Clone, Default)]
pub struct ThemeAffinityScorer {
    dictionary: ThemeDictionary,
}

impl ThemeAffinityScorer {
    pub fn new(dictionary: ThemeDictionary) -> Self {
        Self { dictionary }
    }

    pub fn dictionary(&self) -> &ThemeDictionary {
        &self.dictionary
    }

    /// Mean weight of whole-word keyword matches in already-cleaned text.
    /// Each keyword counts once; no match gives exactly 0.0.
    pub fn score_cleaned(&self, cleaned: &str) -> f64 {
        let words: Vec<&str> = cleaned.split_whitespace().collect();
        let weights: Vec<f64> = self
            .dictionary
            .iter()
            .filter(|(keyword, _)| words.contains(keyword))
            .map(|(_, weight)| weight)
            .collect();

        if weights.is_empty() {
            0.0
        } else {
            weights.iter().sum::<f64>() / weights.len() as f64
        }
    }

    /// Keywords occurring anywhere in the cleaned text, dictionary order
    pub fn identify_themes(&self, cleaned: &str) -> Vec<String> {
        self.dictionary
            .keywords()
            .filter(|keyword| cleaned.contains(keyword))
            .map(str::to_string)
            .collect()
    }
}

impl SentimentScorer for ThemeAffinityScorer {
    fn score(&self, text: &str) -> f64 {
        self.score_cleaned(&clean_text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("I was Flying! (again) 3x"), "i was flying again x");
    }

    #[test]
    fn test_no_keyword_is_exactly_zero() {
        let scorer = ThemeAffinityScorer::default();
        assert_eq!(scorer.score("A quiet walk in the garden."), 0.0);
    }

    #[test]
    fn test_flying_and_falling_mean() {
        let scorer = ThemeAffinityScorer::default();
        let score = scorer.score("I was flying and then falling");
        assert!((score - 0.2).abs() < 1e-10, "got {}", score);
    }

    #[test]
    fn test_whole_word_only_and_counted_once() {
        let scorer = ThemeAffinityScorer::default();
        // "homework" is not "work"; "love" twice still counts once
        assert_eq!(scorer.score("homework homework"), 0.0);
        assert!((scorer.score("love, love and love") - 0.7).abs() < 1e-10);
    }

    #[test]
    fn test_punctuation_does_not_hide_keywords() {
        let scorer = ThemeAffinityScorer::default();
        assert!((scorer.score("Death.") - (-0.8)).abs() < 1e-10);
    }

    #[test]
    fn test_identify_themes_uses_containment() {
        let scorer = ThemeAffinityScorer::default();
        let themes = scorer.identify_themes(&clean_text("Homework about water"));
        assert_eq!(themes, vec!["water".to_string(), "work".to_string()]);
    }

    #[test]
    fn test_custom_dictionary() {
        let dict = ThemeDictionary::from_pairs(vec![("ocean".to_string(), 0.4)]);
        let scorer = ThemeAffinityScorer::new(dict);
        assert!((scorer.score("The ocean was endless") - 0.4).abs() < 1e-10);
        assert_eq!(scorer.score("flying"), 0.0);
    }
}
