use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::{SpeakerSummary, TranscriptSegment};

/// WhisperX-style result object; other top-level fields are ignored
#[derive(Deserialize)]
struct SegmentResult {
    segments: Vec<TranscriptSegment>,
}

/// Parse a segment JSON file into validated segments
pub fn parse_segments_file(path: &Path) -> Result<Vec<TranscriptSegment>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_segments_json(&content)
}

/// Parse segment JSON into validated segments
///
/// Accepts a bare array of segments or an object with a `segments` array.
pub fn parse_segments_json(json: &str) -> Result<Vec<TranscriptSegment>> {
    let segments: Vec<TranscriptSegment> = if json.trim_start().starts_with('[') {
        serde_json::from_str(json).context("Failed to parse segment list JSON")?
    } else {
        let result: SegmentResult =
            serde_json::from_str(json).context("Failed to parse segment result JSON")?;
        result.segments
    };
    validate_segments(&segments)?;
    Ok(segments)
}

/// Check timestamps: finite, non-negative start, end not before start
fn validate_segments(segments: &[TranscriptSegment]) -> Result<()> {
    for (index, segment) in segments.iter().enumerate() {
        if !segment.start.is_finite() || !segment.end.is_finite() {
            anyhow::bail!("Segment {} has a non-finite timestamp", index);
        }
        if segment.start < 0.0 {
            anyhow::bail!("Segment {} starts before zero ({})", index, segment.start);
        }
        if segment.end < segment.start {
            anyhow::bail!(
                "Segment {} ends before it starts ({} < {})",
                index,
                segment.end,
                segment.start
            );
        }
    }
    Ok(())
}

/// Parse a speaker summary (`speaking_time` / `word_count`) JSON file
pub fn parse_speaker_summary_file(path: &Path) -> Result<SpeakerSummary> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    serde_json::from_str(&content).context("Failed to parse speaker summary JSON")
}
