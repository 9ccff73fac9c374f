use crate::block::{Block, Document, Span};
use crate::error::Result;
use crate::inline::split_spans;
use crate::render::{Renderer, fit_row};

/// Renders a document as plain terminal text, dropping bold markers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, document: &Document) -> Result<String> {
        let mut out = String::new();
        let mut prev: Option<&Block> = None;

        for block in document {
            let in_list = matches!(
                (prev, block),
                (Some(Block::ListItem { .. }), Block::ListItem { .. })
            );
            if prev.is_some() && !in_list {
                out.push('\n');
            }
            emit_block(block, &mut out);
            prev = Some(block);
        }

        Ok(out)
    }
}

fn emit_block(block: &Block, out: &mut String) {
    match block {
        Block::Header { level, content } => {
            let text = join(content);
            let underline = match level {
                1 => Some('='),
                2 => Some('-'),
                3 => Some('~'),
                _ => None,
            };
            out.push_str(&text);
            out.push('\n');
            if let Some(ch) = underline.filter(|_| !text.is_empty()) {
                out.extend(std::iter::repeat_n(ch, text.chars().count()));
                out.push('\n');
            }
        }
        Block::Paragraph { content } => {
            out.push_str(&join(content));
            out.push('\n');
        }
        Block::ListItem { content } => {
            out.push_str("• ");
            out.push_str(&join(content));
            out.push('\n');
        }
        Block::Table { headers, rows } => table_to_text(headers, rows, out),
        // The separating newline already makes the gap
        Block::Spacer => {}
    }
}

fn join(spans: &[Span]) -> String {
    spans.iter().map(Span::text).collect()
}

fn cell_text(cell: &str) -> String {
    join(&split_spans(cell))
}

fn table_to_text(headers: &[String], rows: &[Vec<String>], out: &mut String) {
    let width = if headers.is_empty() {
        rows.iter().map(Vec::len).max().unwrap_or(0)
    } else {
        headers.len()
    };
    if width == 0 {
        return;
    }

    let header: Vec<String> = fit_row(headers, width).map(cell_text).collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| fit_row(row, width).map(cell_text).collect())
        .collect();

    let mut widths: Vec<usize> = vec![0; width];
    for row in std::iter::once(&header).chain(&body) {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    if !headers.is_empty() {
        push_row(&header, &widths, out);
        let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        out.push_str(rule.join("-+-").trim_end());
        out.push('\n');
    }
    for row in &body {
        push_row(row, &widths, out);
    }
}

fn push_row(cells: &[String], widths: &[usize], out: &mut String) {
    // Padding cells at the end of a short row would leave a dangling `|`
    let used = cells.iter().rposition(|cell| !cell.is_empty()).map_or(0, |i| i + 1);
    let padded: Vec<String> = cells[..used]
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{ParseOptions, parse, parse_with_options};
    use pretty_assertions::assert_eq;

    fn text(report: &str) -> String {
        TextRenderer.render(&parse(report)).unwrap()
    }

    #[test]
    fn headers_are_underlined_by_level() {
        assert_eq!(text("# Report"), "Report\n======\n");
        assert_eq!(text("## Outlook"), "Outlook\n-------\n");
        assert_eq!(text("#### SAFE"), "SAFE\n");
    }

    #[test]
    fn empty_header_is_one_line() {
        assert_eq!(text("#"), "\n");
        assert_eq!(text("# \nAfter"), "\n\nAfter\n");
    }

    #[test]
    fn short_row_has_no_trailing_separator() {
        let report = "| IIT | Rank |\n|---|---|\n| IIT Delhi |";
        assert_eq!(text(report), "IIT       | Rank\n----------+-----\nIIT Delhi\n");
    }

    #[test]
    fn list_items_stay_together() {
        assert_eq!(
            text("Intro **now**\n- one\n- **two**\nEnd"),
            "Intro now\n\n• one\n• two\n\nEnd\n"
        );
    }

    #[test]
    fn table_columns_align() {
        let report = "| IIT | Rank |\n|---|---|\n| IIT Bombay | **120** |\n| IIT Delhi |";
        assert_eq!(
            text(report),
            "IIT        | Rank\n-----------+-----\nIIT Bombay | 120\nIIT Delhi\n"
        );
    }

    #[test]
    fn spacer_adds_blank_line() {
        let options = ParseOptions {
            spacers: true,
            ..ParseOptions::default()
        };
        let doc = parse_with_options("One\n\nTwo", &options);
        assert_eq!(TextRenderer.render(&doc).unwrap(), "One\n\n\nTwo\n");
    }

    #[test]
    fn empty_document() {
        assert_eq!(text(""), "");
    }
}
