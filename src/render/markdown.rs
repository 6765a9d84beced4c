use crate::models::{DocumentBlock, TextRun};

const BOLD_MARKER: &str = "**";

/// Parse the markdown subset used by generated summaries into document blocks
///
/// Each non-empty trimmed line becomes one block. Classification order:
/// 1. wrapped in `**` (and longer than 4 chars) -> bold paragraph
/// 2. `##` -> heading level 2
/// 3. `#` -> heading level 1
/// 4. `- ` or `• ` -> bullet item with inline bold runs
/// 5. anything else -> paragraph with inline bold runs
///
/// The bold-wrap check runs first, so `**- item**` is a bold paragraph,
/// not a bullet.
pub fn parse_markdown(text: &str) -> Vec<DocumentBlock> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> DocumentBlock {
    if is_bold_line(line) {
        let text = line.trim_matches('*').trim();
        return DocumentBlock::Paragraph {
            runs: vec![TextRun::bold(text)],
        };
    }

    if line.starts_with("##") {
        return DocumentBlock::heading(2, line.trim_start_matches('#').trim());
    }

    if line.starts_with('#') {
        return DocumentBlock::heading(1, line.trim_start_matches('#').trim());
    }

    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("• ")) {
        return DocumentBlock::BulletItem {
            runs: parse_inline(rest.trim()),
        };
    }

    DocumentBlock::Paragraph {
        runs: parse_inline(line),
    }
}

fn is_bold_line(line: &str) -> bool {
    line.chars().count() > 4 && line.starts_with(BOLD_MARKER) && line.ends_with(BOLD_MARKER)
}

/// Split a line into plain and bold runs on `**text**` pairs
///
/// A pair matches when `**` is followed by one or more non-`*` characters and
/// then `**`. Scanning is left to right and the leftmost match wins; bold
/// content is not rescanned, so nesting is unsupported. Unmatched markers are
/// kept verbatim in plain runs. Joining the run texts reproduces the input
/// minus the markers of matched pairs.
pub fn parse_inline(text: &str) -> Vec<TextRun> {
    let bytes = text.as_bytes();
    let mut runs = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;

    // '*' is ASCII, so byte offsets next to it are always char boundaries
    while i + 1 < bytes.len() {
        if bytes[i] == b'*' && bytes[i + 1] == b'*' {
            if let Some(content_end) = closing_marker(bytes, i + 2) {
                push_plain(&mut runs, &text[plain_start..i]);
                runs.push(TextRun::bold(&text[i + 2..content_end]));
                i = content_end + 2;
                plain_start = i;
                continue;
            }
        }
        i += 1;
    }

    push_plain(&mut runs, &text[plain_start..]);
    runs
}

/// End of bold content starting at `start`, if a non-empty `[^*]+\*\*` follows
fn closing_marker(bytes: &[u8], start: usize) -> Option<usize> {
    let offset = bytes.get(start..)?.iter().position(|&b| b == b'*')?;
    if offset == 0 {
        return None;
    }
    let end = start + offset;
    (bytes.get(end + 1) == Some(&b'*')).then_some(end)
}

fn push_plain(runs: &mut Vec<TextRun>, text: &str) {
    if !text.is_empty() {
        runs.push(TextRun::plain(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, bold: bool) -> TextRun {
        TextRun {
            text: text.to_string(),
            bold,
        }
    }

    #[test]
    fn test_standalone_bold_line() {
        let blocks = parse_markdown("**Decision**");
        assert_eq!(
            blocks,
            vec![DocumentBlock::Paragraph {
                runs: vec![run("Decision", true)]
            }]
        );
    }

    #[test]
    fn test_bullet_with_bold_prefix() {
        let blocks = parse_markdown("- **A** did B");
        assert_eq!(
            blocks,
            vec![DocumentBlock::BulletItem {
                runs: vec![run("A", true), run(" did B", false)]
            }]
        );
    }

    #[test]
    fn test_headings() {
        let blocks = parse_markdown("# Title\n## Section\n### Deeper ###");
        assert_eq!(
            blocks,
            vec![
                DocumentBlock::heading(1, "Title"),
                DocumentBlock::heading(2, "Section"),
                DocumentBlock::heading(2, "Deeper ###"),
            ]
        );
    }

    #[test]
    fn test_blank_lines_skipped_and_trimmed() {
        let blocks = parse_markdown("\n   \n  plain text  \n\n• dot bullet\n");
        assert_eq!(
            blocks,
            vec![
                DocumentBlock::Paragraph {
                    runs: vec![run("plain text", false)]
                },
                DocumentBlock::BulletItem {
                    runs: vec![run("dot bullet", false)]
                },
            ]
        );
    }

    #[test]
    fn test_bold_wrap_checked_before_bullet() {
        let blocks = parse_markdown("**- item**");
        assert_eq!(
            blocks,
            vec![DocumentBlock::Paragraph {
                runs: vec![run("- item", true)]
            }]
        );
    }

    #[test]
    fn test_bold_line_strips_incidental_asterisks() {
        let blocks = parse_markdown("*** Summary ***");
        assert_eq!(blocks[0].runs(), &[run("Summary", true)]);
    }

    #[test]
    fn test_short_marker_line_is_plain() {
        let blocks = parse_markdown("****");
        assert_eq!(blocks[0].runs(), &[run("****", false)]);
    }

    #[test]
    fn test_bold_wrapped_line_with_inner_pairs() {
        // Starts and ends with ** so the whole line is one bold run
        let blocks = parse_markdown("**A** and **B**");
        assert_eq!(blocks[0].runs(), &[run("A** and **B", true)]);
    }

    #[test]
    fn test_inline_multiple_pairs() {
        let runs = parse_inline("Owner **Speaker 1** to **Speaker 2**: review");
        assert_eq!(
            runs,
            vec![
                run("Owner ", false),
                run("Speaker 1", true),
                run(" to ", false),
                run("Speaker 2", true),
                run(": review", false),
            ]
        );
    }

    #[test]
    fn test_inline_unmatched_marker_kept() {
        assert_eq!(parse_inline("a ** b"), vec![run("a ** b", false)]);
        assert_eq!(parse_inline("**** x"), vec![run("**** x", false)]);
    }

    #[test]
    fn test_inline_leftmost_match_after_extra_star() {
        assert_eq!(parse_inline("***a**"), vec![run("*", false), run("a", true)]);
    }

    #[test]
    fn test_inline_single_star_blocks_pair() {
        // Content cannot cross a lone '*', so the first pair is "** c **"
        assert_eq!(
            parse_inline("**a*b** c **d**"),
            vec![run("**a*b", false), run(" c ", true), run("d**", false)]
        );
    }

    #[test]
    fn test_inline_multibyte_text() {
        assert_eq!(
            parse_inline("ผู้พูด **คนพูด 1** สั่งงาน"),
            vec![run("ผู้พูด ", false), run("คนพูด 1", true), run(" สั่งงาน", false)]
        );
    }

    #[test]
    fn test_runs_reconstruct_line() {
        let lines = [
            "- **Speaker 1** asked **Speaker 2**: \"when?\"",
            "Budget ** approved",
            "Mixed **bold** and ***odd** markers **",
            "• **Due:** Friday",
        ];

        for line in lines {
            let blocks = parse_markdown(line);
            let rebuilt = blocks[0].plain_text();
            let body = line
                .strip_prefix("- ")
                .or_else(|| line.strip_prefix("• "))
                .unwrap_or(line);

            let runs = parse_inline(body);
            let removed_markers = runs.iter().filter(|r| r.bold).count() * 4;
            assert_eq!(rebuilt.len() + removed_markers, body.len(), "line: {line}");
            assert_eq!(rebuilt.replace('*', ""), body.replace('*', ""), "line: {line}");
        }
    }
}
