//! Dream journal service: the operations exposed to the web layer and CLI
//!
//! Every insight operation returns a value. Store failures are logged and
//! turned into the same degraded sentinels the analyzers use.

use std::sync::Arc;
use chrono::{DateTime, Duration, Utc};
use tracing::{info, error};

use crate::InsightConfig;
use crate::core::mood::MoodAnalyzer;
use crate::core::patterns;
use crate::core::store::{check_score, EntryStore, StoreError};
use crate::core::themes::{ThemeError, ThemeMiner};
use crate::core::trend::TrendAnalyzer;
use crate::types::{
    AnalysisResult, DominantMood, DreamEntry, InsightReason, MoodDistribution, MoodTrend,
    PatternResult, PatternSummary, ThemeCluster, ThemeResult, TrendReport, UserId,
};
use crate::{FEEDBACK_MIN_THEME_FREQUENCY, FEEDBACK_NEGATIVE_AVERAGE, FEEDBACK_POSITIVE_AVERAGE};

pub const FEEDBACK_NOT_ENOUGH_DATA: &str = "Not enough dream entries to generate insights.";
pub const FEEDBACK_KEEP_LOGGING: &str = "Keep logging your dreams to receive personalized insights.";
pub const FEEDBACK_ERROR: &str = "An error occurred while generating feedback. Please try again later.";
const FEEDBACK_NEGATIVE: &str =
    "You've had several negative dreams recently. Consider practicing relaxation techniques before bed.";
const FEEDBACK_POSITIVE: &str =
    "Your dreams have been notably positive lately. This often indicates good emotional well-being.";

/// Compose the feedback paragraph from a trend report and mined themes
pub fn synthesize(report: &TrendReport, themes: Option<&[ThemeCluster]>) -> String {
    if report.reason.is_error() {
        return FEEDBACK_ERROR.to_string();
    }
    if !report.has_data() {
        return FEEDBACK_NOT_ENOUGH_DATA.to_string();
    }

    let mut clauses: Vec<String> = Vec::new();

    if let Some(trend) = report.trend {
        if trend != MoodTrend::Stable {
            clauses.push(format!("Your dream moods have been {} lately.", trend));
        }
    }

    if let Some(average) = report.average_mood {
        if report.dominant_mood == DominantMood::Negative && average < FEEDBACK_NEGATIVE_AVERAGE {
            clauses.push(FEEDBACK_NEGATIVE.to_string());
        } else if report.dominant_mood == DominantMood::Positive && average > FEEDBACK_POSITIVE_AVERAGE {
            clauses.push(FEEDBACK_POSITIVE.to_string());
        }
    }

    for theme in themes.unwrap_or_default() {
        if theme.frequency >= FEEDBACK_MIN_THEME_FREQUENCY {
            clauses.push(format!("You frequently dream about {}.", theme.keywords.join(", ")));
        }
    }

    if clauses.is_empty() {
        FEEDBACK_KEEP_LOGGING.to_string()
    } else {
        clauses.join(" ")
    }
}

/// Insight pipeline bound to an entry store
pub struct DreamJournal<S: EntryStore> {
    store: Arc<S>,
    analyzer: MoodAnalyzer,
    trends: TrendAnalyzer,
    miner: ThemeMiner,
    config: InsightConfig,
}

impl<S: EntryStore> std::fmt::Debug for DreamJournal<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DreamJournal")
            .field("analyzer", &self.analyzer)
            .field("miner", &self.miner)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<S: EntryStore> DreamJournal<S> {
    pub fn new(store: Arc<S>, config: InsightConfig) -> Self {
        Self {
            store,
            analyzer: MoodAnalyzer::new(config.themes.clone()),
            trends: TrendAnalyzer::new(),
            miner: ThemeMiner::from_config(&config),
            config,
        }
    }

    /// Replace the mood analyzer (e.g. with stub sentiment models)
    pub fn with_analyzer(mut self, analyzer: MoodAnalyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Detailed analysis of one text
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        self.analyzer.analyze(text)
    }

    /// Score a new dream and insert it with its score
    ///
    /// An invalid score is rejected before anything is written.
    pub fn record_dream(&self, user_id: UserId, text: &str) -> Result<DreamEntry, StoreError> {
        let score = check_score(self.analyzer.mood_score(text))?;
        let entry = self.store.insert_scored_entry(user_id, text, score)?;
        info!(user_id, entry_id = entry.id, mood_score = score, "Dream recorded");
        Ok(entry)
    }

    /// Trend over the last `days` days
    pub fn mood_trends(&self, user_id: UserId, days: i64) -> TrendReport {
        self.mood_trends_at(user_id, days, Utc::now())
    }

    /// Trend over the `days` days before `now`
    pub fn mood_trends_at(&self, user_id: UserId, days: i64, now: DateTime<Utc>) -> TrendReport {
        let since = match Duration::try_days(days).and_then(|d| now.checked_sub_signed(d)) {
            Some(since) => since,
            None => {
                error!(user_id, days, "Lookback window out of range");
                return TrendReport::error();
            }
        };
        match self.store.fetch_entries(user_id, Some(since)) {
            Ok(entries) => {
                let scores: Vec<Option<f64>> = entries.iter().map(|e| e.mood_score).collect();
                self.trends.analyze(&scores)
            }
            Err(e) => {
                error!(user_id, error = %e, "Error fetching entries for mood trends");
                TrendReport::error()
            }
        }
    }

    /// Theme mining result with its reason code
    pub fn theme_result(&self, user_id: UserId, min_dreams: usize) -> ThemeResult {
        match self.store.fetch_entries(user_id, None) {
            Ok(entries) => {
                let texts: Vec<String> = entries.into_iter().map(|e| e.text).collect();
                self.miner.mine(&texts, min_dreams)
            }
            Err(e) => {
                let e = ThemeError::Store(e.to_string());
                error!(user_id, error = %e, "Error finding recurring themes");
                ThemeResult::none(InsightReason::R303_THEMES_ERROR, 0)
            }
        }
    }

    /// Theme clusters, or None when there are too few dreams or mining failed
    pub fn recurring_themes(&self, user_id: UserId, min_dreams: usize) -> Option<Vec<ThemeCluster>> {
        self.theme_result(user_id, min_dreams).themes
    }

    /// Feedback over the configured lookback window
    pub fn feedback(&self, user_id: UserId) -> String {
        let report = self.mood_trends(user_id, self.config.lookback_days);
        let themes = self.recurring_themes(user_id, self.config.min_dreams);
        synthesize(&report, themes.as_deref())
    }

    /// Summary, distribution and report over the whole journal, with a reason code
    pub fn pattern_result(&self, user_id: UserId) -> PatternResult {
        match self.store.fetch_entries(user_id, None) {
            Ok(entries) => {
                let reason = if entries.is_empty() {
                    InsightReason::R402_PATTERNS_NO_DATA
                } else {
                    InsightReason::R401_PATTERNS_COMPUTED
                };
                PatternResult::computed(
                    patterns::summarize(&entries),
                    patterns::distribution(&entries),
                    patterns::report(&entries),
                    reason,
                )
            }
            Err(e) => {
                error!(user_id, error = %e, "Error fetching entries for patterns");
                PatternResult::error()
            }
        }
    }

    /// Month-level summary of the whole journal
    pub fn patterns(&self, user_id: UserId) -> Option<PatternSummary> {
        self.pattern_result(user_id).summary
    }

    pub fn mood_distribution(&self, user_id: UserId) -> MoodDistribution {
        self.pattern_result(user_id).distribution
    }

    pub fn pattern_report(&self, user_id: UserId) -> String {
        self.pattern_result(user_id).report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scorer::SentimentScorer;
    use crate::core::store::MemoryStore;
    use crate::core::theme_affinity::ThemeAffinityScorer;
    use crate::types::ThemeDictionary;
    use pretty_assertions::assert_eq;

    struct Fixed(f64);

    impl SentimentScorer for Fixed {
        fn score(&self, _text: &str) -> f64 {
            self.0
        }
    }

    fn cluster(keywords: &[&str], frequency: usize) -> ThemeCluster {
        ThemeCluster {
            theme: "Theme 1".to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            frequency,
        }
    }

    fn report(average: f64, trend: MoodTrend, dominant: DominantMood) -> TrendReport {
        TrendReport::computed(average, trend, dominant, InsightReason::R201_TREND_COMPUTED)
    }

    #[test]
    fn test_no_data_message() {
        assert_eq!(synthesize(&TrendReport::no_data(), None), FEEDBACK_NOT_ENOUGH_DATA);
    }

    #[test]
    fn test_error_report_message() {
        assert_eq!(synthesize(&TrendReport::error(), None), FEEDBACK_ERROR);
    }

    #[test]
    fn test_stable_without_themes_keeps_logging() {
        let r = report(0.05, MoodTrend::Stable, DominantMood::Neutral);
        assert_eq!(synthesize(&r, None), FEEDBACK_KEEP_LOGGING);
        assert_eq!(synthesize(&r, Some(&[])), FEEDBACK_KEEP_LOGGING);
    }

    #[test]
    fn test_single_dream_mentions_neutral_trend() {
        let r = TrendReport::computed(
            0.05,
            MoodTrend::Neutral,
            DominantMood::Neutral,
            InsightReason::R203_TREND_SINGLE_ENTRY,
        );
        assert_eq!(synthesize(&r, None), "Your dream moods have been neutral lately.");
    }

    #[test]
    fn test_declining_negative_with_theme() {
        let r = report(-0.45, MoodTrend::Declining, DominantMood::Negative);
        let themes = vec![cluster(&["exam", "school", "late"], 3), cluster(&["ocean"], 2)];
        assert_eq!(
            synthesize(&r, Some(&themes)),
            "Your dream moods have been declining lately. \
             You've had several negative dreams recently. Consider practicing relaxation techniques before bed. \
             You frequently dream about exam, school, late."
        );
    }

    #[test]
    fn test_positive_remark_needs_average_above_threshold() {
        let r = report(0.3, MoodTrend::Improving, DominantMood::Positive);
        assert_eq!(synthesize(&r, None), "Your dream moods have been improving lately.");
        let r = report(0.6, MoodTrend::Stable, DominantMood::Positive);
        assert_eq!(synthesize(&r, None), FEEDBACK_POSITIVE);
    }

    #[test]
    fn test_record_dream_persists_analysis_score() {
        let store = Arc::new(MemoryStore::new());
        let user = store.create_user("ana", "h").unwrap();
        let journal = DreamJournal::new(store.clone(), InsightConfig::default());

        let text = "I was flying over a calm sea with my family";
        let entry = journal.record_dream(user.id, text).unwrap();
        let stored = store.entry(entry.id).unwrap();
        assert_eq!(stored.mood_score, Some(journal.analyze(text).mood_score));
        assert_eq!(entry.mood_score, stored.mood_score);
    }

    #[test]
    fn test_unknown_user_degrades() {
        let journal = DreamJournal::new(Arc::new(MemoryStore::new()), InsightConfig::default());
        assert_eq!(journal.mood_trends(42, 30), TrendReport::error());
        assert_eq!(journal.recurring_themes(42, 3), None);
        assert_eq!(journal.feedback(42), FEEDBACK_ERROR);
        assert_eq!(journal.patterns(42), None);
        assert_eq!(journal.pattern_result(42), PatternResult::error());
        assert!(journal.pattern_result(42).reason.is_error());
    }

    #[test]
    fn test_pattern_reason_tells_empty_from_computed() {
        let store = Arc::new(MemoryStore::new());
        let user = store.create_user("ana", "h").unwrap();
        let journal = DreamJournal::new(store, InsightConfig::default());

        let empty = journal.pattern_result(user.id);
        assert_eq!(empty.reason, InsightReason::R402_PATTERNS_NO_DATA);
        assert_eq!(empty.summary, None);

        journal.record_dream(user.id, "a quiet walk by the water").unwrap();
        let result = journal.pattern_result(user.id);
        assert_eq!(result.reason, InsightReason::R401_PATTERNS_COMPUTED);
        assert_eq!(result.summary.unwrap().total_dreams, 1);
    }

    #[test]
    fn test_trend_window_excludes_old_entries() {
        let store = Arc::new(MemoryStore::new());
        let user = store.create_user("ana", "h").unwrap();
        let now = Utc::now();
        let old = store.insert_entry_at(user.id, "old", now - Duration::days(60)).unwrap();
        store.store_mood_score(old.id, -0.9).unwrap();
        let recent = store.insert_entry_at(user.id, "recent", now - Duration::days(2)).unwrap();
        store.store_mood_score(recent.id, 0.4).unwrap();

        let journal = DreamJournal::new(store, InsightConfig::default());
        let report = journal.mood_trends_at(user.id, 30, now);
        assert_eq!(report.average_mood, Some(0.4));
        assert_eq!(report.trend, Some(MoodTrend::Neutral));
    }

    #[test]
    fn test_extreme_window_returns_a_report() {
        let store = Arc::new(MemoryStore::new());
        let user = store.create_user("ana", "h").unwrap();
        let journal = DreamJournal::new(store, InsightConfig::default());
        journal.record_dream(user.id, "a calm lake").unwrap();

        assert_eq!(journal.mood_trends(user.id, 100_000_000), TrendReport::error());
        assert_eq!(journal.mood_trends(user.id, i64::MAX), TrendReport::error());
        assert_eq!(journal.mood_trends(user.id, i64::MIN), TrendReport::error());
        assert_eq!(journal.mood_trends(user.id, 30).reason, InsightReason::R203_TREND_SINGLE_ENTRY);
    }

    #[test]
    fn test_scoring_failure_leaves_no_orphan_entry() {
        let store = Arc::new(MemoryStore::new());
        let user = store.create_user("ana", "h").unwrap();
        let analyzer = MoodAnalyzer::with_scorers(
            Box::new(Fixed(f64::NAN)),
            Box::new(Fixed(0.0)),
            ThemeAffinityScorer::new(ThemeDictionary::default()),
        );
        let journal = DreamJournal::new(store.clone(), InsightConfig::default()).with_analyzer(analyzer);

        let err = journal.record_dream(user.id, "flying").unwrap_err();
        assert!(matches!(err, StoreError::ScoreOutOfRange(_)));
        assert!(store.fetch_entries(user.id, None).unwrap().is_empty());
        assert_eq!(journal.mood_trends(user.id, 30), TrendReport::no_data());
    }
}
