use tracing::debug;

use crate::models::{ConsolidatedBlock, Consolidation, TranscriptSegment};
use crate::transcript::SpeakerLabeler;

/// Segments sorted by start time; ties keep their input order
pub fn sort_chronologically(segments: &[TranscriptSegment]) -> Vec<&TranscriptSegment> {
    let mut sorted: Vec<&TranscriptSegment> = segments.iter().collect();
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));
    sorted
}

/// Merge consecutive same-speaker segments into display blocks
///
/// Segments are sorted by start time, labeled through `labeler`, and each
/// maximal run sharing a label becomes one block whose text is the trimmed
/// segment texts joined by a single space.
pub fn consolidate(segments: &[TranscriptSegment], labeler: &dyn SpeakerLabeler) -> Consolidation {
    let mut blocks: Vec<ConsolidatedBlock> = Vec::new();
    let mut current: Option<BlockBuilder> = None;

    for segment in sort_chronologically(segments) {
        let label = labeler.label(segment.speaker.as_deref());
        let text = segment.text.trim();

        let same_speaker = current.as_ref().is_some_and(|b| b.label == label);
        if same_speaker {
            if let Some(builder) = current.as_mut() {
                builder.push(segment, text);
            }
            continue;
        }

        // Speaker changed: close the current block
        if let Some(builder) = current.take() {
            blocks.push(builder.finish());
        }
        current = Some(BlockBuilder::start(label, segment, text));
    }

    if let Some(builder) = current {
        blocks.push(builder.finish());
    }

    let combined_text = blocks
        .iter()
        .map(|b| format!("[{}]: {}", b.speaker_label, b.text))
        .collect::<Vec<_>>()
        .join("\n\n");

    debug!(
        "Consolidated {} segments into {} blocks",
        segments.len(),
        blocks.len()
    );

    Consolidation {
        blocks,
        combined_text,
    }
}

/// Non-empty trimmed segment texts in chronological order, joined by a single space
pub fn plain_text(segments: &[TranscriptSegment]) -> String {
    sort_chronologically(segments)
        .iter()
        .map(|s| s.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

struct BlockBuilder<'a> {
    label: String,
    texts: Vec<&'a str>,
    start_time: f64,
    end_time: f64,
}

impl<'a> BlockBuilder<'a> {
    fn start(label: String, segment: &TranscriptSegment, text: &'a str) -> Self {
        Self {
            label,
            texts: vec![text],
            start_time: segment.start,
            end_time: segment.end,
        }
    }

    fn push(&mut self, segment: &TranscriptSegment, text: &'a str) {
        self.texts.push(text);
        self.end_time = segment.end;
    }

    fn finish(self) -> ConsolidatedBlock {
        ConsolidatedBlock {
            speaker_label: self.label,
            text: self.texts.join(" "),
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::DefaultSpeakerLabeler;

    fn seg(start: f64, end: f64, speaker: Option<&str>, text: &str) -> TranscriptSegment {
        TranscriptSegment::new(start, end, speaker, text)
    }

    #[test]
    fn test_empty_input() {
        let result = consolidate(&[], &DefaultSpeakerLabeler::default());

        assert!(result.blocks.is_empty());
        assert!(result.combined_text.is_empty());
    }

    #[test]
    fn test_merges_runs_after_sorting() {
        let segments = vec![
            seg(4.0, 5.0, Some("SPEAKER_01"), " how are you "),
            seg(0.0, 1.0, Some("SPEAKER_00"), "hello"),
            seg(1.0, 2.0, Some("SPEAKER_00"), " world"),
            seg(6.0, 7.0, Some("SPEAKER_00"), "fine"),
        ];

        let result = consolidate(&segments, &DefaultSpeakerLabeler::default());

        assert_eq!(result.blocks.len(), 3);
        assert_eq!(result.blocks[0].speaker_label, "Speaker 1");
        assert_eq!(result.blocks[0].text, "hello world");
        assert_eq!(result.blocks[0].start_time, 0.0);
        assert_eq!(result.blocks[0].end_time, 2.0);
        assert_eq!(result.blocks[1].speaker_label, "Speaker 2");
        assert_eq!(result.blocks[1].text, "how are you");
        assert_eq!(result.blocks[2].text, "fine");

        assert_eq!(
            result.combined_text,
            "[Speaker 1]: hello world\n\n[Speaker 2]: how are you\n\n[Speaker 1]: fine"
        );
    }

    #[test]
    fn test_missing_speaker_is_unknown() {
        let segments = vec![seg(0.0, 1.0, None, "a"), seg(1.0, 2.0, Some(""), "b")];

        let result = consolidate(&segments, &DefaultSpeakerLabeler::default());

        assert_eq!(result.blocks.len(), 1);
        assert_eq!(result.blocks[0].speaker_label, "Unknown");
        assert_eq!(result.blocks[0].text, "a b");
    }

    #[test]
    fn test_stable_for_equal_starts() {
        let segments = vec![
            seg(1.0, 2.0, Some("SPEAKER_00"), "first"),
            seg(1.0, 2.0, Some("SPEAKER_01"), "second"),
        ];

        let result = consolidate(&segments, &DefaultSpeakerLabeler::default());

        assert_eq!(result.blocks[0].text, "first");
        assert_eq!(result.blocks[1].text, "second");
    }

    #[test]
    fn test_content_preserved_in_order() {
        let segments = vec![
            seg(3.0, 4.0, Some("SPEAKER_00"), " c "),
            seg(0.0, 1.0, Some("SPEAKER_01"), "a"),
            seg(2.0, 3.0, Some("SPEAKER_00"), "b"),
            seg(5.0, 6.0, Some("SPEAKER_01"), "d e"),
            seg(4.5, 5.0, None, "x"),
        ];

        let result = consolidate(&segments, &DefaultSpeakerLabeler::default());

        let from_blocks: String = result.blocks.iter().map(|b| b.text.replace(' ', "")).collect();
        let from_segments: String = sort_chronologically(&segments)
            .iter()
            .map(|s| s.text.trim().replace(' ', ""))
            .collect();
        assert_eq!(from_blocks, from_segments);
        assert_eq!(from_blocks, "abcxde");
    }

    #[test]
    fn test_custom_labeler_controls_grouping() {
        let segments = vec![
            seg(0.0, 1.0, Some("SPEAKER_00"), "one"),
            seg(1.0, 2.0, Some("SPEAKER_01"), "two"),
        ];
        let everyone = |_: Option<&str>| "Room".to_string();

        let result = consolidate(&segments, &everyone);

        assert_eq!(result.blocks.len(), 1);
        assert_eq!(result.combined_text, "[Room]: one two");
    }

    #[test]
    fn test_plain_text() {
        let segments = vec![
            seg(2.0, 3.0, Some("SPEAKER_00"), " later "),
            seg(0.0, 1.0, None, "earlier"),
        ];
        assert_eq!(plain_text(&segments), "earlier later");
    }
}
