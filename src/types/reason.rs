//! Reason codes for insight results
//!
//! Every trend report, theme result and pattern result carries one of these so callers can
//! tell a computed value from an insufficient-data or degraded sentinel.

use serde::{Deserialize, Serialize};

/// Reason codes for trend, theme and pattern outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum InsightReason {
    // =========================================================================
    // R20x: Mood trends
    // =========================================================================
    /// Trend fitted over two or more scores
    R201_TREND_COMPUTED,
    /// No entries inside the lookback window
    R202_TREND_NO_DATA,
    /// A single entry, no regression possible
    R203_TREND_SINGLE_ENTRY,
    /// Malformed scores or store failure
    R204_TREND_ERROR,

    // =========================================================================
    // R30x: Recurring themes
    // =========================================================================
    /// Clusters extracted
    R301_THEMES_FOUND,
    /// Fewer entries than min_dreams
    R302_THEMES_INSUFFICIENT_DREAMS,
    /// Vectorization, clustering or store failure
    R303_THEMES_ERROR,

    // =========================================================================
    // R40x: Journal patterns
    // =========================================================================
    /// Summary built from at least one dream
    R401_PATTERNS_COMPUTED,
    /// The journal is empty
    R402_PATTERNS_NO_DATA,
    /// Store failure
    R403_PATTERNS_ERROR,
}

impl InsightReason {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R201_TREND_COMPUTED => "R201_TREND_COMPUTED",
            Self::R202_TREND_NO_DATA => "R202_TREND_NO_DATA",
            Self::R203_TREND_SINGLE_ENTRY => "R203_TREND_SINGLE_ENTRY",
            Self::R204_TREND_ERROR => "R204_TREND_ERROR",
            Self::R301_THEMES_FOUND => "R301_THEMES_FOUND",
            Self::R302_THEMES_INSUFFICIENT_DREAMS => "R302_THEMES_INSUFFICIENT_DREAMS",
            Self::R303_THEMES_ERROR => "R303_THEMES_ERROR",
            Self::R401_PATTERNS_COMPUTED => "R401_PATTERNS_COMPUTED",
            Self::R402_PATTERNS_NO_DATA => "R402_PATTERNS_NO_DATA",
            Self::R403_PATTERNS_ERROR => "R403_PATTERNS_ERROR",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R201_TREND_COMPUTED => "Trend computed",
            Self::R202_TREND_NO_DATA => "No dreams in the lookback window",
            Self::R203_TREND_SINGLE_ENTRY => "Only one dream, trend is neutral",
            Self::R204_TREND_ERROR => "Trend calculation failed",
            Self::R301_THEMES_FOUND => "Recurring themes found",
            Self::R302_THEMES_INSUFFICIENT_DREAMS => "Not enough dreams to mine themes",
            Self::R303_THEMES_ERROR => "Theme mining failed",
            Self::R401_PATTERNS_COMPUTED => "Journal patterns computed",
            Self::R402_PATTERNS_NO_DATA => "No dreams recorded yet",
            Self::R403_PATTERNS_ERROR => "Journal patterns could not be read",
        }
    }

    /// Is this a degraded (failure) outcome?
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::R204_TREND_ERROR | Self::R303_THEMES_ERROR | Self::R403_PATTERNS_ERROR
        )
    }
}

impl std::fmt::Display for InsightReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
