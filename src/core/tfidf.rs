//! TF-IDF vector space over dream texts
//!
//! Tokens are runs of two or more word characters, lowercased, English stop
//! words removed. The vocabulary keeps the `max_features` terms with the
//! highest corpus frequency (ties alphabetical) and is then sorted
//! alphabetically. Weights are raw counts × smoothed idf
//! `ln((1 + n) / (1 + df)) + 1`, rows L2-normalized.

use std::collections::{BTreeMap, HashSet};
use lazy_static::lazy_static;
use regex::Regex;

use crate::core::themes::ThemeError;

lazy_static! {
    static ref RE_TOKEN: Regex = Regex::new(r"\b\w\w+\b").unwrap();

    static ref STOP_WORDS: HashSet<&'static str> = [
        "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
        "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
        "amongst", "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone",
        "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became",
        "because", "become", "becomes", "becoming", "been", "before", "beforehand", "behind",
        "being", "below", "beside", "besides", "between", "beyond", "bill", "both", "bottom",
        "but", "by", "call", "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry",
        "de", "describe", "detail", "do", "done", "down", "due", "during", "each", "eg",
        "eight", "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even",
        "ever", "every", "everyone", "everything", "everywhere", "except", "few", "fifteen",
        "fifty", "fill", "find", "fire", "first", "five", "for", "former", "formerly", "forty",
        "found", "four", "from", "front", "full", "further", "get", "give", "go", "had", "has",
        "hasnt", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein",
        "hereupon", "hers", "herself", "him", "himself", "his", "how", "however", "hundred",
        "i", "ie", "if", "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself",
        "keep", "last", "latter", "latterly", "least", "less", "ltd", "made", "many", "may",
        "me", "meanwhile", "might", "mill", "mine", "more", "moreover", "most", "mostly",
        "move", "much", "must", "my", "myself", "name", "namely", "neither", "never",
        "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
        "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
        "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
        "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem",
        "seemed", "seeming", "seems", "serious", "several", "she", "should", "show", "side",
        "since", "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something",
        "sometime", "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than",
        "that", "the", "their", "them", "themselves", "then", "thence", "there", "thereafter",
        "thereby", "therefore", "therein", "thereupon", "these", "they", "thick", "thin",
        "third", "this", "those", "though", "three", "through", "throughout", "thru", "thus",
        "to", "together", "too", "top", "toward", "towards", "twelve", "twenty", "two", "un",
        "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well", "were",
        "what", "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas",
        "whereby", "wherein", "whereupon", "wherever", "whether", "which", "while", "whither",
        "who", "whoever", "whole", "whom", "whose", "why", "will", "with", "within", "without",
        "would", "yet", "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect();
}

/// Is this an English stop word?
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Lowercased tokens with stop words removed
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    RE_TOKEN
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|t| !is_stop_word(t))
        .map(str::to_string)
        .collect()
}

/// Dense document-term matrix
#[derive(Debug, Clone, PartialEq)]
pub struct TfidfMatrix {
    /// Alphabetical vocabulary; column i of every row is term i
    pub vocabulary: Vec<String>,
    /// One L2-normalized row per document
    pub rows: Vec<Vec<f64>>,
}

/// Fits a vocabulary and produces TF-IDF rows
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    max_features: usize,
}

impl TfidfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self { max_features }
    }

    pub fn fit_transform(&self, documents: &[String]) -> Result<TfidfMatrix, ThemeError> {
        if documents.is_empty() {
            return Err(ThemeError::NoDocuments);
        }

        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d)).collect();

        // corpus frequency per term, alphabetical
        let mut corpus_tf: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            for token in tokens {
                *corpus_tf.entry(token.as_str()).or_insert(0) += 1;
            }
        }
        if corpus_tf.is_empty() {
            return Err(ThemeError::EmptyVocabulary);
        }

        // keep the most frequent terms; stable sort leaves ties alphabetical
        let mut ranked: Vec<(&str, usize)> = corpus_tf.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(self.max_features);

        let mut vocabulary: Vec<String> = ranked.into_iter().map(|(t, _)| t.to_string()).collect();
        vocabulary.sort();

        let n_docs = documents.len() as f64;
        let n_terms = vocabulary.len();

        let mut counts: Vec<Vec<f64>> = vec![vec![0.0; n_terms]; documents.len()];
        let mut df = vec![0usize; n_terms];
        for (row, tokens) in counts.iter_mut().zip(&tokenized) {
            for token in tokens {
                if let Ok(col) = vocabulary.binary_search(token) {
                    row[col] += 1.0;
                }
            }
            for (col, count) in row.iter().enumerate() {
                if *count > 0.0 {
                    df[col] += 1;
                }
            }
        }

        let idf: Vec<f64> = df
            .iter()
            .map(|&d| ((1.0 + n_docs) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        for row in counts.iter_mut() {
            for (value, w) in row.iter_mut().zip(&idf) {
                *value *= w;
            }
            let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                row.iter_mut().for_each(|v| *v /= norm);
            }
        }

        Ok(TfidfMatrix { vocabulary, rows: counts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_tokenize_drops_stop_words_and_short_tokens() {
        assert_eq!(tokenize("I was in a Dark forest, x y"), vec!["dark", "forest"]);
    }

    #[test]
    fn test_vocabulary_sorted_and_rows_normalized() {
        let m = TfidfVectorizer::new(100)
            .fit_transform(&docs(&["ocean waves ocean", "forest trees", "ocean forest"]))
            .unwrap();
        assert_eq!(m.vocabulary, vec!["forest", "ocean", "trees", "waves"]);
        for row in &m.rows {
            let norm: f64 = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_rarer_term_weighs_more() {
        let m = TfidfVectorizer::new(100)
            .fit_transform(&docs(&["ocean waves", "ocean forest", "ocean trees"]))
            .unwrap();
        let row = &m.rows[0];
        let ocean = m.vocabulary.iter().position(|t| t == "ocean").unwrap();
        let waves = m.vocabulary.iter().position(|t| t == "waves").unwrap();
        assert!(row[waves] > row[ocean]);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let m = TfidfVectorizer::new(2)
            .fit_transform(&docs(&["apple apple banana cherry cherry cherry date"]))
            .unwrap();
        assert_eq!(m.vocabulary, vec!["apple", "cherry"]);
    }

    #[test]
    fn test_only_stop_words_is_error() {
        let err = TfidfVectorizer::new(100)
            .fit_transform(&docs(&["the and of", "I was"]))
            .unwrap_err();
        assert!(matches!(err, ThemeError::EmptyVocabulary));
    }
}
