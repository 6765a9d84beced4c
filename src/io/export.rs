use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tracing::{info, warn};

use crate::error::RecapError;
use crate::models::{DocumentBlock, SpeakerStatsMap, TextRun, TranscriptSegment};
use crate::render::{parse_markdown, write_blocks, writer_for_extension};
use crate::transcript::{
    consolidate, describe_speaker, format_duration, format_time, sort_chronologically,
    SpeakerLabeler,
};

/// Header row of the transcript table
pub const TRANSCRIPT_TABLE_HEADER: [&str; 4] = ["Start", "End", "Speaker", "Text"];

/// Optional context printed in the "General Information" section
#[derive(Debug, Clone)]
pub struct ExportMetadata {
    /// Source audio file; only the file name is shown
    pub audio_file: Option<String>,
    /// Audio length in seconds
    pub audio_length: Option<f64>,
    /// End-to-end processing time in seconds
    pub processing_seconds: Option<f64>,
    pub generated_at: NaiveDateTime,
}

impl ExportMetadata {
    pub fn now() -> Self {
        Self {
            audio_file: None,
            audio_length: None,
            processing_seconds: None,
            generated_at: Local::now().naive_local(),
        }
    }

    fn has_source_details(&self) -> bool {
        self.audio_file.is_some()
            || self.audio_length.is_some()
            || self.processing_seconds.is_some()
    }

    fn info_blocks(&self) -> Vec<DocumentBlock> {
        let mut blocks = vec![DocumentBlock::heading(1, "General Information")];

        if let Some(audio_file) = &self.audio_file {
            let name = Path::new(audio_file)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| audio_file.clone());
            blocks.push(DocumentBlock::text(format!("Audio file: {}", name)));
        }

        blocks.push(DocumentBlock::text(format!(
            "Generated: {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        )));

        if let Some(length) = self.audio_length.filter(|l| *l > 0.0) {
            blocks.push(DocumentBlock::text(format!(
                "Audio length: {} min",
                format_duration(length)
            )));
        }

        if let Some(seconds) = self.processing_seconds {
            blocks.push(DocumentBlock::text(format!(
                "Processing time: {:.1} seconds",
                seconds
            )));
        }

        blocks
    }
}

/// Build the raw transcript document: metadata, segment table, combined text
pub fn transcript_document(
    segments: &[TranscriptSegment],
    labeler: &dyn SpeakerLabeler,
    metadata: &ExportMetadata,
) -> Vec<DocumentBlock> {
    let mut blocks = vec![DocumentBlock::heading(0, "Meeting Transcript")];
    blocks.extend(metadata.info_blocks());

    blocks.push(DocumentBlock::heading(1, "Transcript"));
    let rows = sort_chronologically(segments)
        .into_iter()
        .map(|segment| {
            vec![
                format_time(segment.start),
                format_time(segment.end),
                labeler.label(segment.speaker.as_deref()),
                segment.text.trim().to_string(),
            ]
        })
        .collect();
    blocks.push(DocumentBlock::Table {
        header_cells: TRANSCRIPT_TABLE_HEADER.iter().map(|h| h.to_string()).collect(),
        rows,
    });

    blocks.push(DocumentBlock::heading(1, "Combined Text"));
    for block in consolidate(segments, labeler).blocks {
        blocks.push(DocumentBlock::text(format!(
            "[{}]: {}",
            block.speaker_label, block.text
        )));
    }

    blocks
}

/// Build the summary document: optional metadata and speaker summary, then the parsed summary
pub fn summary_document(
    summary_text: &str,
    metadata: Option<&ExportMetadata>,
    speaker_stats: Option<&SpeakerStatsMap>,
) -> Vec<DocumentBlock> {
    let mut blocks = vec![DocumentBlock::heading(0, "Meeting Summary")];

    if let Some(metadata) = metadata.filter(|m| m.has_source_details()) {
        blocks.extend(metadata.info_blocks());
    }

    if let Some(stats) = speaker_stats.filter(|s| !s.is_empty()) {
        blocks.push(DocumentBlock::heading(1, "Speaker Summary"));
        blocks.extend(stats.ranked().into_iter().map(|s| DocumentBlock::BulletItem {
            runs: vec![TextRun::plain(describe_speaker(s))],
        }));
    }

    blocks.push(DocumentBlock::heading(1, "Summary"));
    blocks.extend(parse_markdown(summary_text));
    blocks
}

/// Write blocks through the backend matching the path's extension
pub fn write_document(blocks: &[DocumentBlock], path: &Path) -> Result<PathBuf, RecapError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| {
            RecapError::Render(format!("cannot pick a document backend for {:?}", path))
        })?;

    let mut writer = writer_for_extension(extension)?;
    write_blocks(writer.as_mut(), blocks);
    let written = writer.save(path)?;
    info!("Wrote {} blocks to {:?}", blocks.len(), written);
    Ok(written)
}

pub fn export_transcript(
    segments: &[TranscriptSegment],
    labeler: &dyn SpeakerLabeler,
    metadata: &ExportMetadata,
    path: &Path,
) -> Result<PathBuf, RecapError> {
    write_document(&transcript_document(segments, labeler, metadata), path)
}

pub fn export_summary(
    summary_text: &str,
    metadata: Option<&ExportMetadata>,
    speaker_stats: Option<&SpeakerStatsMap>,
    path: &Path,
) -> Result<PathBuf, RecapError> {
    write_document(&summary_document(summary_text, metadata, speaker_stats), path)
}

/// Output paths for a combined export: `<base>_transcript.<ext>` and `<base>_summary.<ext>`
pub fn export_paths(base: &Path, extension: &str) -> (PathBuf, PathBuf) {
    let extension = extension.trim_start_matches('.');
    let with_suffix = |suffix: &str| {
        let mut name = base.as_os_str().to_os_string();
        name.push(format!("_{}.{}", suffix, extension));
        PathBuf::from(name)
    };
    (with_suffix("transcript"), with_suffix("summary"))
}

/// Outcome of a combined export; each document succeeds or fails on its own
#[derive(Debug)]
pub struct ExportOutcome {
    pub transcript: Result<PathBuf, RecapError>,
    pub summary: Result<PathBuf, RecapError>,
}

/// Inputs for a combined transcript + summary export
pub struct CombinedExport<'a> {
    pub segments: &'a [TranscriptSegment],
    pub summary_text: &'a str,
    pub labeler: &'a dyn SpeakerLabeler,
    pub metadata: &'a ExportMetadata,
    pub speaker_stats: Option<&'a SpeakerStatsMap>,
}

/// Export both documents next to `base`
pub fn export_both(export: &CombinedExport<'_>, base: &Path, extension: &str) -> ExportOutcome {
    let (transcript_path, summary_path) = export_paths(base, extension);

    let transcript = export_transcript(
        export.segments,
        export.labeler,
        export.metadata,
        &transcript_path,
    );
    if let Err(e) = &transcript {
        warn!("Transcript export failed: {}", e);
    }

    let summary = export_summary(
        export.summary_text,
        Some(export.metadata),
        export.speaker_stats,
        &summary_path,
    );
    if let Err(e) = &summary {
        warn!("Summary export failed: {}", e);
    }

    ExportOutcome {
        transcript,
        summary,
    }
}
