//! Core types for dreamlog

mod mood;
mod reason;
mod analysis;
mod trend;
mod theme;
mod entry;
mod patterns;

pub use mood::{MoodLabel, MoodBucket};
pub use reason::InsightReason;
pub use analysis::{SentimentScores, ComponentScores, WordCount, AnalysisResult};
pub use trend::{MoodTrend, DominantMood, TrendReport};
pub use theme::{ThemeDictionary, ThemeCluster, ThemeResult, DEFAULT_THEMES};
pub use entry::{User, DreamEntry, EntryRecord, UserId, EntryId};
pub use patterns::{PatternSummary, PatternResult, MoodDistribution};
