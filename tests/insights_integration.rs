//! Integration tests for the journal service
//!
//! Recording, trend windows, recurring themes and feedback over a shared store

use std::sync::Arc;
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;

use dreamlog::core::{load_journal, save_journal, DreamJournal, EntryStore, MemoryStore};
use dreamlog::types::{DominantMood, InsightReason, MoodTrend, ThemeDictionary};
use dreamlog::InsightConfig;

fn journal() -> (Arc<MemoryStore>, DreamJournal<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let journal = DreamJournal::new(store.clone(), InsightConfig::default());
    (store, journal)
}

/// Insert entries `days_ago` old with fixed scores
fn seed(store: &MemoryStore, user_id: u64, entries: &[(&str, i64, f64)]) {
    let now = Utc::now();
    for (text, days_ago, score) in entries {
        let entry = store
            .insert_entry_at(user_id, text, now - Duration::days(*days_ago))
            .unwrap();
        store.store_mood_score(entry.id, *score).unwrap();
    }
}

#[test]
fn test_stored_score_matches_analysis() {
    let (store, journal) = journal();
    let user = store.create_user("ana", "h").unwrap();

    let texts = [
        "I was flying over the ocean and it felt wonderful",
        "Someone chased me through a dark school hallway",
        "A long quiet train ride",
    ];
    for text in texts {
        journal.record_dream(user.id, text).unwrap();
    }

    let fetched = store.fetch_entries(user.id, None).unwrap();
    assert_eq!(fetched.len(), 3);
    for (record, text) in fetched.iter().zip(texts) {
        assert_eq!(record.text, text);
        assert_eq!(record.mood_score, Some(journal.analyze(text).mood_score));
    }
}

#[test]
fn test_record_for_unknown_user_fails() {
    let (_, journal) = journal();
    assert!(journal.record_dream(99, "anything").is_err());
}

#[test]
fn test_no_entries_feedback() {
    let (store, journal) = journal();
    let user = store.create_user("ana", "h").unwrap();

    let report = journal.mood_trends(user.id, 30);
    assert_eq!(report.dominant_mood, DominantMood::NoData);
    assert_eq!(report.average_mood, None);
    assert_eq!(journal.feedback(user.id), "Not enough dream entries to generate insights.");
}

#[test]
fn test_stable_neutral_feedback() {
    let (store, journal) = journal();
    let user = store.create_user("ana", "h").unwrap();
    seed(&store, user.id, &[("a calm lake", 3, 0.0), ("a calm field", 1, 0.0)]);

    let report = journal.mood_trends(user.id, 30);
    assert_eq!(report.trend, Some(MoodTrend::Stable));
    assert_eq!(report.dominant_mood, DominantMood::Neutral);
    assert_eq!(
        journal.feedback(user.id),
        "Keep logging your dreams to receive personalized insights."
    );
}

#[test]
fn test_single_dream_feedback_mentions_neutral_trend() {
    let (store, journal) = journal();
    let user = store.create_user("ana", "h").unwrap();
    seed(&store, user.id, &[("a calm lake", 1, 0.0)]);

    let report = journal.mood_trends(user.id, 30);
    assert_eq!(report.trend, Some(MoodTrend::Neutral));
    assert_eq!(report.reason, InsightReason::R203_TREND_SINGLE_ENTRY);
    assert_eq!(journal.feedback(user.id), "Your dream moods have been neutral lately.");
}

#[test]
fn test_declining_negative_feedback_with_theme() {
    let (store, journal) = journal();
    let user = store.create_user("ana", "h").unwrap();
    seed(
        &store,
        user.id,
        &[
            ("exam school classroom", 5, -0.1),
            ("exam school classroom late", 4, -0.4),
            ("school exam classroom", 3, -0.6),
            ("classroom exam school", 2, -0.8),
        ],
    );

    let report = journal.mood_trends(user.id, 30);
    assert_eq!(report.trend, Some(MoodTrend::Declining));
    assert_eq!(report.dominant_mood, DominantMood::Negative);

    let feedback = journal.feedback(user.id);
    assert!(feedback.starts_with(
        "Your dream moods have been declining lately. \
         You've had several negative dreams recently."
    ));
    assert!(feedback.contains("You frequently dream about "));
}

#[test]
fn test_old_entries_outside_window() {
    let (store, journal) = journal();
    let user = store.create_user("ana", "h").unwrap();
    seed(&store, user.id, &[("old", 90, -0.9), ("older", 60, -0.9)]);

    assert_eq!(journal.mood_trends(user.id, 30).reason, InsightReason::R202_TREND_NO_DATA);
    assert_eq!(journal.mood_trends(user.id, 100).average_mood, Some(-0.9));
}

#[test]
fn test_unscored_entry_degrades_trend() {
    let (store, journal) = journal();
    let user = store.create_user("ana", "h").unwrap();
    seed(&store, user.id, &[("scored", 2, 0.3)]);
    store.insert_entry(user.id, "never analyzed").unwrap();

    let report = journal.mood_trends(user.id, 30);
    assert_eq!(report.trend, Some(MoodTrend::Error));
    assert_eq!(report.dominant_mood, DominantMood::Error);
    assert_eq!(
        journal.feedback(user.id),
        "An error occurred while generating feedback. Please try again later."
    );
}

#[test]
fn test_themes_need_min_dreams() {
    let (store, journal) = journal();
    let user = store.create_user("ana", "h").unwrap();
    seed(&store, user.id, &[("ocean waves", 2, 0.2), ("forest trees", 1, 0.2)]);

    assert_eq!(journal.recurring_themes(user.id, 3), None);
    let result = journal.theme_result(user.id, 3);
    assert_eq!(result.reason, InsightReason::R302_THEMES_INSUFFICIENT_DREAMS);
    assert_eq!(result.dream_count, 2);

    let themes = journal.recurring_themes(user.id, 2).unwrap();
    assert_eq!(themes.iter().map(|t| t.frequency).sum::<usize>(), 2);
}

#[test]
fn test_patterns_over_journal() {
    let (store, journal) = journal();
    let user = store.create_user("ana", "h").unwrap();
    seed(&store, user.id, &[("one", 1, 0.6), ("two", 1, 0.2), ("three", 1, -0.7)]);

    let summary = journal.patterns(user.id).unwrap();
    assert_eq!(summary.total_dreams, 3);

    let dist = journal.mood_distribution(user.id);
    let total: f64 = dist.values().sum();
    assert!((total - 100.0).abs() < 1e-9);

    let report = journal.pattern_report(user.id);
    assert!(report.starts_with("Mood Distribution:\n"));
    assert!(report.contains("Peak Dream Recording Times:"));

    assert_eq!(journal.pattern_result(user.id).reason, InsightReason::R401_PATTERNS_COMPUTED);
}

#[test]
fn test_custom_dictionary_changes_theme_component() {
    let config = InsightConfig {
        themes: ThemeDictionary::from_pairs(vec![("ocean".to_string(), -1.0)]),
        ..InsightConfig::default()
    };
    let journal = DreamJournal::new(Arc::new(MemoryStore::new()), config);
    let result = journal.analyze("the ocean");
    assert_eq!(result.components.theme, -1.0);
    assert_eq!(result.identified_themes, vec!["ocean"]);
}

#[test]
fn test_journal_file_keeps_scores() {
    let path = std::env::temp_dir().join(format!("dreamlog_insights_{}.json", std::process::id()));
    let path = path.to_string_lossy().to_string();

    let (store, journal) = journal();
    let user = store.create_user("ana", "h").unwrap();
    let entry = journal.record_dream(user.id, "flying over my family home").unwrap();
    save_journal(&store, &path).unwrap();

    let reloaded = Arc::new(load_journal(&path).unwrap());
    let journal = DreamJournal::new(reloaded.clone(), InsightConfig::default());
    let records = reloaded.fetch_entries(user.id, None).unwrap();
    let expected = entry.mood_score.unwrap();
    assert!((records[0].mood_score.unwrap() - expected).abs() < 1e-12);
    let average = journal.mood_trends(user.id, 30).average_mood.unwrap();
    assert!((average - expected).abs() < 1e-12);

    std::fs::remove_file(&path).ok();
}
