use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::RecapError;
use crate::models::{DocumentBlock, TextRun};

/// Receives the styled runs of an open paragraph
pub trait RunSink {
    fn append_run(&mut self, text: &str, bold: bool);
}

/// Receives the body rows of an open table
pub trait RowAppender {
    fn append_row(&mut self, cells: &[String]);
}

/// Capabilities a document-writing backend must provide
pub trait DocumentWriter {
    /// Level 0 is the document title
    fn add_heading(&mut self, text: &str, level: u8);
    fn add_paragraph(&mut self) -> &mut dyn RunSink;
    fn add_bullet_paragraph(&mut self) -> &mut dyn RunSink;
    fn add_table(&mut self, header_cells: &[String]) -> &mut dyn RowAppender;
    /// Persist the document, returning the written path
    fn save(&self, path: &Path) -> Result<PathBuf, RecapError>;
}

/// Play a block sequence into a backend in order
pub fn write_blocks(writer: &mut dyn DocumentWriter, blocks: &[DocumentBlock]) {
    for block in blocks {
        match block {
            DocumentBlock::Heading { level, text } => writer.add_heading(text, *level),
            DocumentBlock::Paragraph { runs } => append_runs(writer.add_paragraph(), runs),
            DocumentBlock::BulletItem { runs } => append_runs(writer.add_bullet_paragraph(), runs),
            DocumentBlock::Table { header_cells, rows } => {
                let table = writer.add_table(header_cells);
                for row in rows {
                    table.append_row(row);
                }
            }
        }
    }
}

fn append_runs(sink: &mut dyn RunSink, runs: &[TextRun]) {
    for run in runs {
        sink.append_run(&run.text, run.bold);
    }
}

impl RunSink for DocumentBlock {
    fn append_run(&mut self, text: &str, bold: bool) {
        if let DocumentBlock::Paragraph { runs } | DocumentBlock::BulletItem { runs } = self {
            runs.push(TextRun {
                text: text.to_string(),
                bold,
            });
        }
    }
}

impl RowAppender for DocumentBlock {
    fn append_row(&mut self, cells: &[String]) {
        if let DocumentBlock::Table { rows, .. } = self {
            rows.push(cells.to_vec());
        }
    }
}

/// Backend that serializes documents as Markdown text files
#[derive(Debug, Default)]
pub struct MarkdownDocument {
    blocks: Vec<DocumentBlock>,
}

impl MarkdownDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks written so far
    pub fn blocks(&self) -> &[DocumentBlock] {
        &self.blocks
    }

    fn push(&mut self, block: DocumentBlock) -> &mut DocumentBlock {
        self.blocks.push(block);
        let last = self.blocks.len() - 1;
        &mut self.blocks[last]
    }

    /// Render the document as Markdown
    pub fn to_markdown(&self) -> String {
        let mut output = self
            .blocks
            .iter()
            .map(render_block)
            .collect::<Vec<_>>()
            .join("\n\n");
        output.push('\n');
        output
    }
}

impl DocumentWriter for MarkdownDocument {
    fn add_heading(&mut self, text: &str, level: u8) {
        self.push(DocumentBlock::heading(level, text));
    }

    fn add_paragraph(&mut self) -> &mut dyn RunSink {
        self.push(DocumentBlock::Paragraph { runs: Vec::new() })
    }

    fn add_bullet_paragraph(&mut self) -> &mut dyn RunSink {
        self.push(DocumentBlock::BulletItem { runs: Vec::new() })
    }

    fn add_table(&mut self, header_cells: &[String]) -> &mut dyn RowAppender {
        self.push(DocumentBlock::Table {
            header_cells: header_cells.to_vec(),
            rows: Vec::new(),
        })
    }

    fn save(&self, path: &Path) -> Result<PathBuf, RecapError> {
        debug!("Writing {} blocks to {:?}", self.blocks.len(), path);
        std::fs::write(path, self.to_markdown()).map_err(|e| {
            RecapError::Render(format!("failed to write {}: {}", path.display(), e))
        })?;
        Ok(path.to_path_buf())
    }
}

fn render_block(block: &DocumentBlock) -> String {
    match block {
        DocumentBlock::Heading { level, text } => {
            let hashes = "#".repeat(usize::from(*level).min(2) + 1);
            format!("{} {}", hashes, text)
        }
        DocumentBlock::Paragraph { runs } => render_runs(runs),
        DocumentBlock::BulletItem { runs } => format!("- {}", render_runs(runs)),
        DocumentBlock::Table { header_cells, rows } => render_table(header_cells, rows),
    }
}

fn render_runs(runs: &[TextRun]) -> String {
    runs.iter()
        .map(|run| {
            if run.bold && !run.text.is_empty() {
                format!("**{}**", run.text)
            } else {
                run.text.clone()
            }
        })
        .collect()
}

fn render_table(header_cells: &[String], rows: &[Vec<String>]) -> String {
    let mut lines = vec![table_row(header_cells)];
    lines.push(format!("|{}", " --- |".repeat(header_cells.len())));
    lines.extend(rows.iter().map(|row| table_row(row)));
    lines.join("\n")
}

fn table_row(cells: &[String]) -> String {
    let cells: Vec<String> = cells
        .iter()
        .map(|c| c.replace('|', "\\|").replace('\n', "<br>"))
        .collect();
    format!("| {} |", cells.join(" | "))
}

/// Pick a backend for an output file extension
///
/// Only text formats have a backend; anything else is reported as a
/// `RecapError::Render` instead of failing hard.
pub fn writer_for_extension(extension: &str) -> Result<Box<dyn DocumentWriter>, RecapError> {
    match extension.trim_start_matches('.').to_lowercase().as_str() {
        "md" | "markdown" | "txt" => Ok(Box::new(MarkdownDocument::new())),
        other => Err(RecapError::Render(format!(
            "no document backend available for .{} output",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::render::parse_markdown;

    #[test]
    fn test_write_blocks_round_trip() {
        let blocks = parse_markdown("# Title\n**Decision**\n- **A** did B\nplain");
        let mut doc = MarkdownDocument::new();
        write_blocks(&mut doc, &blocks);

        assert_eq!(doc.blocks(), blocks.as_slice());
    }

    #[test]
    fn test_to_markdown() {
        let mut doc = MarkdownDocument::new();
        doc.add_heading("Meeting Summary", 0);
        doc.add_heading("Summary", 1);
        let p = doc.add_paragraph();
        p.append_run("Owner: ", false);
        p.append_run("Speaker 1", true);
        doc.add_bullet_paragraph().append_run("ship it", false);
        let table = doc.add_table(&["Start".to_string(), "Text".to_string()]);
        table.append_row(&["00:01.00".to_string(), "a | b".to_string()]);

        assert_eq!(
            doc.to_markdown(),
            "# Meeting Summary\n\n## Summary\n\nOwner: **Speaker 1**\n\n- ship it\n\n\
             | Start | Text |\n| --- | --- |\n| 00:01.00 | a \\| b |\n"
        );
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.md");
        let mut doc = MarkdownDocument::new();
        doc.add_heading("Hello", 1);

        let written = doc.save(&path).unwrap();

        assert_eq!(written, path);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "## Hello\n");
    }

    #[test]
    fn test_save_into_missing_directory_is_render_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.md");

        let err = MarkdownDocument::new().save(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Render);
    }

    #[test]
    fn test_writer_for_extension() {
        assert!(writer_for_extension("md").is_ok());
        assert!(writer_for_extension(".TXT").is_ok());

        let err = match writer_for_extension("docx") {
            Ok(_) => panic!("expected docx to be unsupported"),
            Err(e) => e,
        };
        assert_eq!(err.kind(), ErrorKind::Render);
        assert!(err.to_string().contains(".docx"));
    }
}
