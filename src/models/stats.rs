use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Aggregate speaking statistics for one resolved speaker label
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakerStats {
    pub speaker_label: String,
    /// Total speaking time in seconds
    pub total_seconds: f64,
    pub word_count: u64,
    /// Share of the total speaking time (0-100)
    pub percentage: f64,
}

/// Speaker statistics keyed by label
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeakerStatsMap {
    stats: BTreeMap<String, SpeakerStats>,
}

impl SpeakerStatsMap {
    /// Build from per-label totals, computing each speaker's share of the grand total
    pub fn from_totals(totals: impl IntoIterator<Item = (String, f64, u64)>) -> Self {
        let mut stats: BTreeMap<String, SpeakerStats> = BTreeMap::new();
        for (label, seconds, words) in totals {
            let entry = stats.entry(label.clone()).or_insert_with(|| SpeakerStats {
                speaker_label: label,
                total_seconds: 0.0,
                word_count: 0,
                percentage: 0.0,
            });
            entry.total_seconds += seconds;
            entry.word_count += words;
        }

        let total: f64 = stats.values().map(|s| s.total_seconds).sum();
        // A zero total yields 0% entries instead of NaN
        let divisor = if total == 0.0 { 1.0 } else { total };
        for entry in stats.values_mut() {
            entry.percentage = entry.total_seconds / divisor * 100.0;
        }

        Self { stats }
    }

    pub fn get(&self, label: &str) -> Option<&SpeakerStats> {
        self.stats.get(label)
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Stats in label order
    pub fn iter(&self) -> impl Iterator<Item = &SpeakerStats> {
        self.stats.values()
    }

    /// Sum of speaking time across all speakers
    pub fn total_seconds(&self) -> f64 {
        self.stats.values().map(|s| s.total_seconds).sum()
    }

    /// Presentation order: descending by speaking time, ties by label
    pub fn ranked(&self) -> Vec<&SpeakerStats> {
        let mut ranked: Vec<&SpeakerStats> = self.stats.values().collect();
        ranked.sort_by(|a, b| b.total_seconds.total_cmp(&a.total_seconds));
        ranked
    }
}

/// Wire schema for speaker statistics exchanged with other services
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeakerSummary {
    #[serde(default)]
    pub speaking_time: BTreeMap<String, f64>,
    #[serde(default)]
    pub word_count: BTreeMap<String, u64>,
}

impl From<&SpeakerStatsMap> for SpeakerSummary {
    fn from(map: &SpeakerStatsMap) -> Self {
        Self {
            speaking_time: map
                .iter()
                .map(|s| (s.speaker_label.clone(), s.total_seconds))
                .collect(),
            word_count: map
                .iter()
                .map(|s| (s.speaker_label.clone(), s.word_count))
                .collect(),
        }
    }
}

impl From<&SpeakerSummary> for SpeakerStatsMap {
    fn from(summary: &SpeakerSummary) -> Self {
        SpeakerStatsMap::from_totals(summary.speaking_time.iter().map(|(label, &seconds)| {
            let words = summary.word_count.get(label).copied().unwrap_or(0);
            (label.clone(), seconds, words)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentages_sum_to_hundred() {
        let map = SpeakerStatsMap::from_totals(vec![
            ("Speaker 1".to_string(), 30.0, 50),
            ("Speaker 2".to_string(), 10.0, 20),
        ]);

        assert_eq!(map.get("Speaker 1").unwrap().percentage, 75.0);
        assert_eq!(map.get("Speaker 2").unwrap().percentage, 25.0);
        let sum: f64 = map.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 0.5);
    }

    #[test]
    fn test_zero_total_gives_zero_percentages() {
        let map = SpeakerStatsMap::from_totals(vec![
            ("A".to_string(), 0.0, 3),
            ("B".to_string(), 0.0, 0),
        ]);

        assert!(map.iter().all(|s| s.percentage == 0.0));
        assert!(map.iter().all(|s| !s.percentage.is_nan()));
    }

    #[test]
    fn test_ranked_descending_by_time() {
        let map = SpeakerStatsMap::from_totals(vec![
            ("A".to_string(), 5.0, 1),
            ("B".to_string(), 20.0, 1),
            ("C".to_string(), 5.0, 1),
        ]);

        let order: Vec<&str> = map.ranked().iter().map(|s| s.speaker_label.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_summary_schema_conversion() {
        let json = r#"{
            "speaking_time": {"Speaker 1": 90.0, "Speaker 2": 30.0},
            "word_count": {"Speaker 1": 200}
        }"#;
        let summary: SpeakerSummary = serde_json::from_str(json).unwrap();
        let map = SpeakerStatsMap::from(&summary);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("Speaker 2").unwrap().word_count, 0);
        assert_eq!(map.get("Speaker 1").unwrap().percentage, 75.0);

        let back = SpeakerSummary::from(&map);
        assert_eq!(back.speaking_time, summary.speaking_time);
        assert_eq!(back.word_count.get("Speaker 1"), Some(&200));
    }
}
