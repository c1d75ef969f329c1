//! Trend analyzer: mean, OLS slope and dominant mood over a score series
//!
//! - 0 scores → no-data report
//! - 1 score → neutral trend
//! - ≥2 scores → slope of least-squares fit against index 0..n-1
//!   slope > 0.1 improving, < -0.1 declining, else stable
//!
//! Failures never escape: a malformed series yields the degraded report.

use thiserror::Error;
use tracing::{info, error};

use crate::TREND_SLOPE_THRESHOLD;
use crate::types::{DominantMood, InsightReason, MoodBucket, MoodTrend, TrendReport};

/// Why a score series could not be analyzed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrendError {
    #[error("entry {0} has no mood score")]
    MissingScore(usize),
    #[error("entry {0} has a non-finite mood score")]
    NonFinite(usize),
}

/// Least-squares slope of `scores` against their index.
/// Returns None for fewer than two points.
pub fn ols_slope(scores: &[f64]) -> Option<f64> {
    let n = scores.len();
    if n < 2 {
        return None;
    }

    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = scores.iter().sum::<f64>() / n as f64;

    let mut num = 0.0;
    let mut den = 0.0;
    for (i, y) in scores.iter().enumerate() {
        let dx = i as f64 - x_mean;
        num += dx * (y - y_mean);
        den += dx * dx;
    }

    Some(num / den)
}

/// Classify a slope
pub fn classify_slope(slope: f64) -> MoodTrend {
    if slope > TREND_SLOPE_THRESHOLD {
        MoodTrend::Improving
    } else if slope < -TREND_SLOPE_THRESHOLD {
        MoodTrend::Declining
    } else {
        MoodTrend::Stable
    }
}

/// Most frequent bucket; ties go to the bucket seen first
pub fn dominant_bucket(scores: &[f64]) -> Option<MoodBucket> {
    let mut counts: Vec<(MoodBucket, usize)> = Vec::with_capacity(3);
    for &score in scores {
        let bucket = MoodBucket::from_score(score);
        match counts.iter_mut().find(|(b, _)| *b == bucket) {
            Some((_, count)) => *count += 1,
            None => counts.push((bucket, 1)),
        }
    }

    let mut best: Option<(MoodBucket, usize)> = None;
    for (bucket, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((bucket, count));
        }
    }
    best.map(|(bucket, _)| bucket)
}

/// Stateless trend analyzer
#[derive(Debug, Default)]
pub struct TrendAnalyzer;

impl TrendAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze a time-ordered series. Unset scores count as malformed data.
    pub fn analyze(&self, scores: &[Option<f64>]) -> TrendReport {
        match self.try_analyze(scores) {
            Ok(report) => {
                info!(
                    entries = scores.len(),
                    average = ?report.average_mood,
                    trend = ?report.trend,
                    dominant = %report.dominant_mood,
                    "Mood trend computed"
                );
                report
            }
            Err(e) => {
                error!(error = %e, "Error calculating mood trends");
                TrendReport::error()
            }
        }
    }

    fn try_analyze(&self, scores: &[Option<f64>]) -> Result<TrendReport, TrendError> {
        if scores.is_empty() {
            return Ok(TrendReport::no_data());
        }

        let mut values = Vec::with_capacity(scores.len());
        for (i, score) in scores.iter().enumerate() {
            let value = score.ok_or(TrendError::MissingScore(i))?;
            if !value.is_finite() {
                return Err(TrendError::NonFinite(i));
            }
            values.push(value);
        }

        let average = values.iter().sum::<f64>() / values.len() as f64;
        let dominant = dominant_bucket(&values)
            .map(DominantMood::from)
            .unwrap_or(DominantMood::NoData);

        let report = match ols_slope(&values) {
            Some(slope) => TrendReport::computed(
                average,
                classify_slope(slope),
                dominant,
                InsightReason::R201_TREND_COMPUTED,
            ),
            None => TrendReport::computed(
                average,
                MoodTrend::Neutral,
                dominant,
                InsightReason::R203_TREND_SINGLE_ENTRY,
            ),
        };

        Ok(report)
    }
}
