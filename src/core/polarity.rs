//! General polarity scorer: pattern-based adjective/adverb sentiment
//!
//! Each lexicon word contributes its polarity. A preceding intensifier
//! scales it, a preceding negator multiplies it by -0.5. The score is the
//! mean contribution, clamped to [-1, 1], or 0.0 when nothing matched.

use std::collections::HashMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::scorer::SentimentScorer;

/// Negated words keep half their strength, flipped
const NEGATION_FACTOR: f64 = -0.5;

lazy_static! {
    static ref RE_WORD: Regex = Regex::new(r"[A-Za-z]+(?:'[A-Za-z]+)?").unwrap();

    // =========================================================================
    // Polarity lexicon
    // =========================================================================
    static ref POLARITY: HashMap<&'static str, f64> = [
        // positive
        ("happy", 0.8), ("joy", 0.8), ("joyful", 0.8), ("glad", 0.5),
        ("good", 0.7), ("great", 0.8), ("wonderful", 1.0), ("amazing", 0.6),
        ("beautiful", 0.85), ("lovely", 0.5), ("nice", 0.6), ("fun", 0.3),
        ("peaceful", 0.5), ("calm", 0.3), ("safe", 0.5), ("warm", 0.6),
        ("bright", 0.7), ("free", 0.4), ("excited", 0.4), ("exciting", 0.3),
        ("best", 1.0), ("better", 0.5), ("perfect", 1.0), ("pleasant", 0.73),
        ("comfortable", 0.4), ("delighted", 0.7), ("magical", 0.5),
        ("gentle", 0.3), ("kind", 0.6), ("proud", 0.8), ("relaxed", 0.4),
        ("love", 0.5), ("loved", 0.7), ("fantastic", 0.4), ("awesome", 1.0),
        ("light", 0.4), ("sweet", 0.35), ("hopeful", 0.5), ("cheerful", 0.6),
        // negative
        ("sad", -0.5), ("bad", -0.7), ("terrible", -1.0), ("horrible", -1.0),
        ("awful", -1.0), ("scary", -0.5), ("scared", -0.6), ("afraid", -0.6),
        ("frightened", -0.6), ("terrified", -0.8), ("dark", -0.15),
        ("cold", -0.6), ("lost", -0.4), ("lonely", -0.5), ("alone", -0.3),
        ("angry", -0.5), ("anxious", -0.5), ("worried", -0.4), ("nervous", -0.3),
        ("strange", -0.05), ("weird", -0.5), ("creepy", -0.6), ("painful", -0.7),
        ("hurt", -0.5), ("dead", -0.2), ("trapped", -0.6), ("helpless", -0.6),
        ("worst", -1.0), ("worse", -0.4), ("ugly", -0.7), ("upset", -0.5),
        ("panicked", -0.7), ("confused", -0.4), ("stuck", -0.4), ("evil", -1.0),
        ("hopeless", -0.7), ("miserable", -1.0), ("disgusting", -1.0),
    ]
    .into_iter()
    .collect();

    // =========================================================================
    // Intensifiers: multiply the next polarity word
    // =========================================================================
    static ref INTENSIFIERS: HashMap<&'static str, f64> = [
        ("very", 1.3), ("really", 1.2), ("extremely", 1.5), ("so", 1.3),
        ("incredibly", 1.4), ("quite", 1.1), ("too", 1.2), ("truly", 1.2),
        ("super", 1.3), ("deeply", 1.3), ("slightly", 0.6), ("somewhat", 0.7),
        ("barely", 0.5),
    ]
    .into_iter()
    .collect();
}

/// Words that flip the next polarity word
fn is_negator(word: &str) -> bool {
    matches!(word, "not" | "no" | "never" | "neither" | "nor" | "nothing" | "hardly")
        || word.ends_with("n't")
}

/// Words that do not break a pending modifier
fn is_filler(word: &str) -> bool {
    matches!(word, "a" | "an" | "the" | "at" | "all" | "be" | "been" | "feel" | "felt")
}

/// Polarity with match metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolarityValue {
    /// Mean polarity in [-1, 1]
    pub value: f64,
    /// Number of lexicon words that contributed
    pub matched: usize,
    pub word_count: usize,
}

/// General-purpose polarity scorer
#[derive(Debug, Default)]
pub struct PolarityScorer;

impl PolarityScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score text with a breakdown
    pub fn parse(&self, text: &str) -> PolarityValue {
        let words: Vec<String> = RE_WORD
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .collect();

        let mut contributions: Vec<f64> = Vec::new();
        let mut intensity = 1.0;
        let mut negated = false;

        for word in &words {
            let word = word.as_str();

            if let Some(&polarity) = POLARITY.get(word) {
                let mut p = (polarity * intensity).clamp(-1.0, 1.0);
                if negated {
                    p *= NEGATION_FACTOR;
                }
                contributions.push(p);
                intensity = 1.0;
                negated = false;
            } else if is_negator(word) {
                negated = true;
            } else if let Some(&factor) = INTENSIFIERS.get(word) {
                intensity *= factor;
            } else if !is_filler(word) {
                intensity = 1.0;
                negated = false;
            }
        }

        let value = if contributions.is_empty() {
            0.0
        } else {
            (contributions.iter().sum::<f64>() / contributions.len() as f64).clamp(-1.0, 1.0)
        };

        PolarityValue {
            value,
            matched: contributions.len(),
            word_count: words.len(),
        }
    }
}

impl SentimentScorer for PolarityScorer {
    fn score(&self, text: &str) -> f64 {
        self.parse(text).value
    }
}
