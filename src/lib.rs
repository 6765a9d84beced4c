pub mod error;
pub mod io;
pub mod llm;
pub mod models;
pub mod render;
pub mod transcript;

pub use error::{ErrorKind, RecapError};
pub use io::{
    export_both, export_summary, export_transcript, parse_segments_file, CombinedExport,
    ExportMetadata, TranscriptReport,
};
pub use llm::{LlmConfig, MeetingType, SummaryClient, SummaryMode, SummaryRequestBuilder};
pub use models::{
    ConsolidatedBlock, Consolidation, DocumentBlock, SpeakerStats, SpeakerStatsMap, TextRun,
    TranscriptSegment,
};
pub use render::{parse_markdown, writer_for_extension, DocumentWriter, MarkdownDocument};
pub use transcript::{
    aggregate_speaker_stats, consolidate, format_duration, format_time, DefaultSpeakerLabeler,
    SpeakerLabeler,
};
