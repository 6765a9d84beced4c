use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use recap::io::parse_speaker_summary_file;
use recap::llm::meeting_type_listing;
use recap::transcript::plain_text;
use recap::{
    aggregate_speaker_stats, consolidate, export_both, export_summary, export_transcript,
    parse_segments_file, CombinedExport, DefaultSpeakerLabeler, ExportMetadata, LlmConfig,
    MeetingType, SpeakerStatsMap, SummaryClient, SummaryMode, TranscriptReport,
    TranscriptSegment,
};

#[derive(Parser)]
#[command(name = "recap")]
#[command(author, version, about = "Meeting transcript summaries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Key themes, details, overall summary
    Plain,
    /// Classify the meeting type and follow its structure
    Meeting,
    /// Meeting structure with speaker statistics and attribution
    Diarized,
}

#[derive(Subcommand)]
enum Commands {
    /// Consolidate diarized segments into speaker blocks and statistics
    Transcript {
        /// Input segment file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the transcript report (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Also write a transcript document (.md)
        #[arg(long)]
        document: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Summarize a transcript with a chat completion endpoint
    Summarize {
        /// Input segment file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the raw summary text
        #[arg(short, long)]
        output: PathBuf,

        /// Summary template
        #[arg(long, value_enum, default_value = "diarized")]
        mode: ModeArg,

        /// Meeting type id (1-11), 0 lets the model classify
        #[arg(long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=11))]
        meeting_type: u8,

        /// Summary language, overrides RECAP_LANGUAGE
        #[arg(long)]
        language: Option<String>,

        /// Also write a summary document (.md)
        #[arg(long)]
        document: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Export transcript and summary documents side by side
    Export {
        /// Input segment file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Summary text file (markdown)
        #[arg(short, long)]
        summary: PathBuf,

        /// Output base path; `_transcript` and `_summary` are appended
        #[arg(short, long)]
        base: PathBuf,

        /// Document format extension
        #[arg(long, default_value = "md")]
        format: String,

        /// Speaker summary JSON to use instead of computing from segments
        #[arg(long)]
        speakers: Option<PathBuf>,

        /// Source audio file name shown in the documents
        #[arg(long)]
        audio_file: Option<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List meeting type ids for --meeting-type and their summary structures
    MeetingTypes,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Transcript {
            input,
            output,
            document,
            verbose,
        } => {
            setup_logging(verbose);
            run_transcript(&input, &output, document.as_deref())
        }
        Commands::Summarize {
            input,
            output,
            mode,
            meeting_type,
            language,
            document,
            verbose,
        } => {
            setup_logging(verbose);
            let mut config = LlmConfig::from_env();
            if let Some(language) = language {
                config = config.with_language(language);
            }
            run_summarize(
                config,
                &input,
                &output,
                mode,
                MeetingType::from_id(meeting_type),
                document.as_deref(),
            )
            .await
        }
        Commands::Export {
            input,
            summary,
            base,
            format,
            speakers,
            audio_file,
            verbose,
        } => {
            setup_logging(verbose);
            run_export(&input, &summary, &base, &format, speakers.as_deref(), audio_file)
        }
        Commands::MeetingTypes => {
            print!("{}", meeting_type_listing());
            Ok(())
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn load_segments(input: &Path) -> Result<Vec<TranscriptSegment>> {
    info!("Loading segments from {:?}", input);
    let segments = parse_segments_file(input).context("Failed to parse input segments")?;
    info!("Loaded {} segments", segments.len());
    Ok(segments)
}

fn audio_length(segments: &[TranscriptSegment]) -> Option<f64> {
    segments.iter().map(|s| s.end).reduce(f64::max)
}

fn run_transcript(input: &Path, output: &Path, document: Option<&Path>) -> Result<()> {
    let segments = load_segments(input)?;
    let labeler = DefaultSpeakerLabeler::default();

    let report = TranscriptReport::from_segments(&segments, &labeler);
    report.write_json(output)?;
    info!("Transcript report written to {:?}", output);

    if let Some(path) = document {
        let metadata = ExportMetadata {
            audio_length: audio_length(&segments),
            ..ExportMetadata::now()
        };
        let written = export_transcript(&segments, &labeler, &metadata, path)?;
        info!("Transcript document written to {:?}", written);
    }

    Ok(())
}

async fn run_summarize(
    config: LlmConfig,
    input: &Path,
    output: &Path,
    mode: ModeArg,
    meeting_type: Option<MeetingType>,
    document: Option<&Path>,
) -> Result<()> {
    let started = Instant::now();
    let segments = load_segments(input)?;
    let labeler = DefaultSpeakerLabeler::default();
    let stats = aggregate_speaker_stats(&segments, &labeler);

    let (mode, transcript) = match mode {
        ModeArg::Plain => (SummaryMode::Plain, plain_text(&segments)),
        ModeArg::Meeting => (
            SummaryMode::MeetingStructure { meeting_type },
            plain_text(&segments),
        ),
        ModeArg::Diarized => (
            SummaryMode::Diarized {
                stats: &stats,
                meeting_type,
            },
            consolidate(&segments, &labeler).combined_text,
        ),
    };

    if transcript.is_empty() {
        warn!("Transcript is empty; the summary will have nothing to work with");
    }

    let client = SummaryClient::new(config);
    let summary = client.summarize(&mode, &transcript).await?;
    std::fs::write(output, &summary)
        .with_context(|| format!("Failed to write summary: {:?}", output))?;
    info!("Summary written to {:?}", output);

    if let Some(path) = document {
        let metadata = ExportMetadata {
            audio_length: audio_length(&segments),
            processing_seconds: Some(started.elapsed().as_secs_f64()),
            ..ExportMetadata::now()
        };
        let speaker_stats = match mode {
            SummaryMode::Diarized { stats, .. } => Some(stats),
            _ => None,
        };
        let written = export_summary(&summary, Some(&metadata), speaker_stats, path)?;
        info!("Summary document written to {:?}", written);
    }

    Ok(())
}

fn run_export(
    input: &Path,
    summary: &Path,
    base: &Path,
    format: &str,
    speakers: Option<&Path>,
    audio_file: Option<String>,
) -> Result<()> {
    let segments = load_segments(input)?;
    let summary_text = std::fs::read_to_string(summary)
        .with_context(|| format!("Failed to read summary: {:?}", summary))?;
    let labeler = DefaultSpeakerLabeler::default();

    let speaker_stats = match speakers {
        Some(path) => SpeakerStatsMap::from(
            &parse_speaker_summary_file(path).context("Failed to parse speaker summary")?,
        ),
        None => aggregate_speaker_stats(&segments, &labeler),
    };

    let metadata = ExportMetadata {
        audio_file,
        audio_length: audio_length(&segments),
        ..ExportMetadata::now()
    };

    let outcome = export_both(
        &CombinedExport {
            segments: &segments,
            summary_text: &summary_text,
            labeler: &labeler,
            metadata: &metadata,
            speaker_stats: Some(&speaker_stats),
        },
        base,
        format,
    );

    let mut failures = 0;
    for (name, result) in [("Transcript", &outcome.transcript), ("Summary", &outcome.summary)] {
        match result {
            Ok(path) => info!("{} document written to {:?}", name, path),
            Err(e) => {
                warn!("{} document failed: {}", name, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of 2 documents failed to export", failures);
    }

    Ok(())
}
