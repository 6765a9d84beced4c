use serde::Deserialize;

/// A timestamped span of transcribed speech, as produced by the diarization engine
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TranscriptSegment {
    /// Start timestamp in seconds
    pub start: f64,
    /// End timestamp in seconds
    pub end: f64,
    /// Raw speaker identifier (e.g. "SPEAKER_00"), absent when diarization was skipped
    #[serde(default)]
    pub speaker: Option<String>,
    /// Transcribed text
    #[serde(default)]
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(start: f64, end: f64, speaker: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            speaker: speaker.map(str::to_string),
            text: text.into(),
        }
    }

    /// Duration of this segment in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Number of whitespace-delimited words in the trimmed text
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// A maximal run of consecutive same-speaker segments merged for display
#[derive(Debug, Clone, PartialEq)]
pub struct ConsolidatedBlock {
    pub speaker_label: String,
    pub text: String,
    pub start_time: f64,
    pub end_time: f64,
}

/// Consolidated transcript: display blocks plus the plain-text rendering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Consolidation {
    pub blocks: Vec<ConsolidatedBlock>,
    /// Blocks rendered as `[label]: text`, separated by a blank line
    pub combined_text: String,
}

impl Consolidation {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
