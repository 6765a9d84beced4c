use crate::models::{SpeakerStats, SpeakerStatsMap, TranscriptSegment};
use crate::transcript::{format_duration, SpeakerLabeler};

/// Compute per-speaker speaking time, word count, and share of total time
///
/// Works per segment, so the result does not depend on how segments are
/// later grouped for display.
pub fn aggregate_speaker_stats(
    segments: &[TranscriptSegment],
    labeler: &dyn SpeakerLabeler,
) -> SpeakerStatsMap {
    SpeakerStatsMap::from_totals(segments.iter().map(|segment| {
        (
            labeler.label(segment.speaker.as_deref()),
            segment.duration(),
            segment.word_count() as u64,
        )
    }))
}

/// One-line description: `label: M:SS (P.P%), W words`
pub fn describe_speaker(stats: &SpeakerStats) -> String {
    format!(
        "{}: {} ({:.1}%), {} words",
        stats.speaker_label,
        format_duration(stats.total_seconds),
        stats.percentage,
        stats.word_count
    )
}
