use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::{SpeakerSummary, TranscriptSegment};
use crate::transcript::{aggregate_speaker_stats, consolidate, sort_chronologically, SpeakerLabeler};

/// Machine-readable transcript view: sorted segments, combined text, speaker summary
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptReport {
    pub segments: Vec<ReportSegment>,
    pub combined_text: String,
    pub speaker_summary: SpeakerSummary,
}

/// Segment with its resolved display label
#[derive(Debug, Clone, Serialize)]
pub struct ReportSegment {
    pub start: f64,
    pub end: f64,
    pub speaker: Option<String>,
    pub speaker_label: String,
    pub text: String,
}

impl TranscriptReport {
    pub fn from_segments(segments: &[TranscriptSegment], labeler: &dyn SpeakerLabeler) -> Self {
        let consolidation = consolidate(segments, labeler);
        let stats = aggregate_speaker_stats(segments, labeler);

        let segments = sort_chronologically(segments)
            .into_iter()
            .map(|s| ReportSegment {
                start: s.start,
                end: s.end,
                speaker: s.speaker.clone(),
                speaker_label: labeler.label(s.speaker.as_deref()),
                text: s.text.trim().to_string(),
            })
            .collect();

        Self {
            segments,
            combined_text: consolidation.combined_text,
            speaker_summary: SpeakerSummary::from(&stats),
        }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}
