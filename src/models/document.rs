/// A contiguous styled span of text within a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

/// Backend-agnostic unit of document output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentBlock {
    /// Level 0 is the document title, 1 a section, 2 a subsection
    Heading { level: u8, text: String },
    Paragraph { runs: Vec<TextRun> },
    BulletItem { runs: Vec<TextRun> },
    Table {
        header_cells: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

impl DocumentBlock {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        DocumentBlock::Heading {
            level,
            text: text.into(),
        }
    }

    /// Paragraph holding a single plain run
    pub fn text(text: impl Into<String>) -> Self {
        DocumentBlock::Paragraph {
            runs: vec![TextRun::plain(text)],
        }
    }

    /// Runs of a paragraph or bullet item, empty for other blocks
    pub fn runs(&self) -> &[TextRun] {
        match self {
            DocumentBlock::Paragraph { runs } | DocumentBlock::BulletItem { runs } => runs,
            _ => &[],
        }
    }

    /// Text of all runs concatenated, ignoring styling
    pub fn plain_text(&self) -> String {
        self.runs().iter().map(|r| r.text.as_str()).collect()
    }
}
