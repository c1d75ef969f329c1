//! dreamlog: mood and theme analytics for dream journals
//!
//! Pipeline: dream text → {lexicon, polarity, theme affinity} scorers →
//! combined mood score → per-user trends, recurring themes and feedback.

pub mod config;
pub mod core;
pub mod types;

pub use config::InsightConfig;

// =============================================================================
// COMBINER WEIGHTS [C]
// =============================================================================

/// Weight of the lexicon (VADER) compound score
pub const WEIGHT_LEXICON: f64 = 0.4;

/// Weight of the general polarity score
pub const WEIGHT_POLARITY: f64 = 0.3;

/// Weight of the theme affinity score
pub const WEIGHT_THEME: f64 = 0.3;

// =============================================================================
// MOOD LABEL THRESHOLDS [C] - evaluated top-down, first match wins
// =============================================================================

/// score >= 0.5 → Very Positive
pub const LABEL_VERY_POSITIVE_MIN: f64 = 0.5;

/// score >= 0.1 → Positive
pub const LABEL_POSITIVE_MIN: f64 = 0.1;

/// score > -0.1 → Neutral
pub const LABEL_NEUTRAL_ABOVE: f64 = -0.1;

/// score > -0.5 → Negative, otherwise Very Negative
pub const LABEL_NEGATIVE_ABOVE: f64 = -0.5;

// =============================================================================
// TREND ANALYSIS [C]
// =============================================================================

/// Slope above this → improving, below its negation → declining
pub const TREND_SLOPE_THRESHOLD: f64 = 0.1;

/// Scores above this count as positive, below its negation as negative
pub const DOMINANT_BUCKET_THRESHOLD: f64 = 0.1;

/// Default lookback window for trends (days)
pub const DEFAULT_LOOKBACK_DAYS: i64 = 30;

// =============================================================================
// THEME MINING [C]
// =============================================================================

/// Minimum number of dreams before themes are mined
pub const DEFAULT_MIN_DREAMS: usize = 3;

/// Fixed k-means seed so "Theme i" numbering is reproducible
pub const DEFAULT_CLUSTER_SEED: u64 = 42;

/// Vocabulary cap for the TF-IDF space
pub const DEFAULT_MAX_FEATURES: usize = 100;

/// Upper bound on clusters (k = min(this, n_texts))
pub const DEFAULT_MAX_CLUSTERS: usize = 3;

/// Keywords reported per cluster
pub const DEFAULT_TOP_TERMS: usize = 3;

// =============================================================================
// FEEDBACK RULES [C]
// =============================================================================

/// Average below this with a negative dominant mood → relaxation advice
pub const FEEDBACK_NEGATIVE_AVERAGE: f64 = -0.3;

/// Average above this with a positive dominant mood → wellbeing remark
pub const FEEDBACK_POSITIVE_AVERAGE: f64 = 0.3;

/// Clusters with at least this many members are mentioned in feedback
pub const FEEDBACK_MIN_THEME_FREQUENCY: usize = 3;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
