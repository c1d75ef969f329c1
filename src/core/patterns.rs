//! Pattern summaries: monthly mood averages, label distribution and a
//! plain-text recording report

use std::collections::BTreeMap;
use chrono::Timelike;

use crate::types::{EntryRecord, MoodDistribution, MoodLabel, PatternSummary};

/// Hours listed under peak recording times
const PEAK_HOURS: usize = 3;

fn month_key(entry: &EntryRecord) -> String {
    entry.timestamp.format("%Y-%m").to_string()
}

/// Month-level statistics. None for an empty journal.
/// Unscored entries count toward totals but not toward mood averages.
pub fn summarize(entries: &[EntryRecord]) -> Option<PatternSummary> {
    if entries.is_empty() {
        return None;
    }

    let mut dreams_per_month: BTreeMap<String, usize> = BTreeMap::new();
    let mut scores_per_month: BTreeMap<String, Vec<f64>> = BTreeMap::new();

    for entry in entries {
        let month = month_key(entry);
        *dreams_per_month.entry(month.clone()).or_insert(0) += 1;
        if let Some(score) = entry.mood_score {
            scores_per_month.entry(month).or_default().push(score);
        }
    }

    let mood_trends = scores_per_month
        .into_iter()
        .map(|(month, scores)| {
            let avg = scores.iter().sum::<f64>() / scores.len() as f64;
            (month, avg)
        })
        .collect();

    let average = entries.len() as f64 / dreams_per_month.len() as f64;

    Some(PatternSummary {
        total_dreams: entries.len(),
        mood_trends,
        dreams_per_month,
        average_dreams_per_month: (average * 100.0).round() / 100.0,
    })
}

/// Label counts over scored entries, most positive label first
fn label_counts(entries: &[EntryRecord]) -> Vec<(MoodLabel, usize)> {
    MoodLabel::ALL
        .iter()
        .map(|label| {
            let count = entries
                .iter()
                .filter_map(|e| e.mood_score)
                .filter(|s| MoodLabel::from_score(*s) == *label)
                .count();
            (*label, count)
        })
        .filter(|(_, count)| *count > 0)
        .collect()
}

/// Percentage of scored entries per label key; absent labels are omitted
pub fn distribution(entries: &[EntryRecord]) -> MoodDistribution {
    let scored = entries.iter().filter(|e| e.mood_score.is_some()).count();
    if scored == 0 {
        return MoodDistribution::new();
    }
    label_counts(entries)
        .into_iter()
        .map(|(label, count)| (label.key().to_string(), count as f64 / scored as f64 * 100.0))
        .collect()
}

/// Plain-text report: mood distribution then peak recording hours
pub fn report(entries: &[EntryRecord]) -> String {
    let mut lines = vec!["Mood Distribution:".to_string()];

    let scored = entries.iter().filter(|e| e.mood_score.is_some()).count();
    let mut counts = label_counts(entries);
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    for (label, count) in counts {
        lines.push(format!(
            "- {}: {} dreams ({:.1}%)",
            label,
            count,
            count as f64 / scored as f64 * 100.0
        ));
    }

    lines.push(String::new());
    lines.push("Peak Dream Recording Times:".to_string());

    let mut hours: BTreeMap<u32, usize> = BTreeMap::new();
    for entry in entries {
        *hours.entry(entry.timestamp.hour()).or_insert(0) += 1;
    }
    let mut peaks: Vec<(u32, usize)> = hours.into_iter().collect();
    peaks.sort_by(|a, b| b.1.cmp(&a.1));
    for (hour, count) in peaks.into_iter().take(PEAK_HOURS) {
        lines.push(format!("- {:02}:00: {} dreams", hour, count));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn record(y: i32, m: u32, d: u32, h: u32, score: Option<f64>) -> EntryRecord {
        EntryRecord {
            text: "dream".to_string(),
            mood_score: score,
            timestamp: Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_journal() {
        assert_eq!(summarize(&[]), None);
        assert!(distribution(&[]).is_empty());
    }

    #[test]
    fn test_monthly_grouping() {
        let entries = vec![
            record(2024, 1, 3, 7, Some(0.2)),
            record(2024, 1, 9, 7, Some(0.6)),
            record(2024, 2, 1, 6, Some(-0.4)),
            record(2024, 2, 5, 6, None),
            record(2024, 3, 5, 6, Some(0.0)),
        ];
        let summary = summarize(&entries).unwrap();
        assert_eq!(summary.total_dreams, 5);
        assert!((summary.mood_trends["2024-01"] - 0.4).abs() < 1e-10);
        assert_eq!(summary.mood_trends["2024-02"], -0.4);
        assert_eq!(summary.dreams_per_month["2024-02"], 2);
        assert_eq!(summary.average_dreams_per_month, 1.67);
    }

    #[test]
    fn test_distribution_percentages() {
        let entries = vec![
            record(2024, 1, 1, 1, Some(0.9)),
            record(2024, 1, 1, 1, Some(0.2)),
            record(2024, 1, 1, 1, Some(0.3)),
            record(2024, 1, 1, 1, Some(-0.7)),
        ];
        let dist = distribution(&entries);
        assert_eq!(dist["positive"], 50.0);
        assert_eq!(dist["very_positive"], 25.0);
        assert_eq!(dist["very_negative"], 25.0);
        assert!(!dist.contains_key("neutral"));
    }

    #[test]
    fn test_report_text() {
        let entries = vec![
            record(2024, 1, 1, 7, Some(0.2)),
            record(2024, 1, 2, 7, Some(0.3)),
            record(2024, 1, 3, 6, Some(-0.3)),
        ];
        let expected = "Mood Distribution:\n\
                        - Positive: 2 dreams (66.7%)\n\
                        - Negative: 1 dreams (33.3%)\n\
                        \n\
                        Peak Dream Recording Times:\n\
                        - 07:00: 2 dreams\n\
                        - 06:00: 1 dreams";
        assert_eq!(report(&entries), expected);
    }
}
