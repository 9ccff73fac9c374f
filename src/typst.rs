use crate::block::{Block, Document, Span};
use crate::config::{Config, TableConfig};
use crate::error::Result;
use crate::inline::split_spans;
use crate::render::{Renderer, fit_row};

/// Lists with at most this many items are kept on one page.
const UNBREAKABLE_LIST_ITEMS: usize = 5;

/// Renders a document as Typst markup.
pub struct TypstRenderer<'a> {
    config: &'a Config,
}

impl<'a> TypstRenderer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }
}

impl Renderer for TypstRenderer<'_> {
    fn render(&self, document: &Document) -> Result<String> {
        Ok(blocks_to_typst(document.blocks(), self.config))
    }
}

/// Consecutive list items are emitted as one list.
enum Item<'b> {
    Single(&'b Block),
    List(&'b [Block]),
}

fn group(blocks: &[Block]) -> Vec<Item<'_>> {
    let mut items = Vec::new();
    let mut i = 0;
    while i < blocks.len() {
        let run = blocks[i..]
            .iter()
            .take_while(|b| matches!(b, Block::ListItem { .. }))
            .count();
        if run > 0 {
            items.push(Item::List(&blocks[i..i + run]));
            i += run;
        } else {
            items.push(Item::Single(&blocks[i]));
            i += 1;
        }
    }
    items
}

/// Convert blocks to Typst markup
pub fn blocks_to_typst(blocks: &[Block], config: &Config) -> String {
    let mut out = String::new();
    emit_preamble(config, &mut out);

    let items = group(blocks);
    let mut i = 0;
    while i < items.len() {
        match &items[i] {
            Item::Single(block) if matches!(block, Block::Header { .. }) => {
                // Keep a header on the same page as what follows it
                out.push_str("#block(breakable: false)[\n");
                emit_block(block, config, &mut out);
                if i + 1 < items.len() {
                    i += 1;
                    emit_item(&items[i], config, &mut out);
                }
                out.push_str("]\n\n");
            }
            item => emit_item(item, config, &mut out),
        }
        i += 1;
    }

    out
}

fn emit_preamble(config: &Config, out: &mut String) {
    out.push_str("#set page(paper: ");
    push_string_literal(&config.page.paper, out);
    if config.page.numbers {
        out.push_str(", numbering: \"1\"");
    }
    out.push_str(")\n");

    out.push_str("#set text(font: ");
    push_string_literal(&config.font.family, out);
    out.push_str(&format!(", size: {})\n", config.font.size));

    out.push_str("#set par(linebreaks: \"optimized\")\n\n");
}

fn push_string_literal(value: &str, out: &mut String) {
    out.push('"');
    for ch in value.chars() {
        if matches!(ch, '"' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
}

fn emit_item(item: &Item<'_>, config: &Config, out: &mut String) {
    match item {
        Item::Single(block) => emit_block(block, config, out),
        Item::List(list) if list.len() <= UNBREAKABLE_LIST_ITEMS => {
            out.push_str("#block(breakable: false)[\n");
            list_to_typst(list, out);
            out.push_str("]\n\n");
        }
        Item::List(list) => {
            list_to_typst(list, out);
            out.push('\n');
        }
    }
}

fn emit_block(block: &Block, config: &Config, out: &mut String) {
    match block {
        Block::Header { level, content } => {
            for _ in 0..*level {
                out.push('=');
            }
            out.push(' ');
            spans_to_typst(content, out);
            out.push_str("\n\n");
        }
        Block::Paragraph { content } => {
            spans_to_typst(content, out);
            out.push_str("\n\n");
        }
        Block::ListItem { .. } => {
            list_to_typst(std::slice::from_ref(block), out);
            out.push('\n');
        }
        Block::Table { headers, rows } => {
            let col_count = column_count(headers, rows);
            if col_count == 0 {
                return;
            }
            out.push_str("#block(breakable: false)[\n");
            table_to_typst(headers, rows, col_count, &config.table, out);
            out.push_str("]\n\n");
        }
        Block::Spacer => {
            out.push_str(&format!("#v({})\n\n", config.spacing.spacer));
        }
    }
}

fn list_to_typst(items: &[Block], out: &mut String) {
    for item in items {
        if let Some(content) = item.spans() {
            out.push_str("- ");
            spans_to_typst(content, out);
            out.push('\n');
        }
    }
}

fn spans_to_typst(spans: &[Span], out: &mut String) {
    for (i, span) in spans.iter().enumerate() {
        let at_start = i == 0;
        match span {
            Span::Plain { text } => escape_text(text, at_start, out),
            Span::Bold { text } if text.is_empty() => {}
            Span::Bold { text } => {
                // `;` ends the embedded expression so following text is never parsed as code
                out.push_str("#strong[");
                escape_text(text, at_start, out);
                out.push_str("];");
            }
        }
    }
}

/// Escape Typst markup characters. `at_start` also escapes list, enum and
/// heading markers that would otherwise start a new construct.
fn escape_text(text: &str, at_start: bool, out: &mut String) {
    let digits_end = if at_start {
        text.find(|c: char| !c.is_ascii_digit()).filter(|&end| end > 0)
    } else {
        None
    };

    for (i, ch) in text.char_indices() {
        let special = matches!(
            ch,
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' | '/' | '~'
        );
        let marker = at_start && i == 0 && matches!(ch, '-' | '+' | '=');
        let enum_dot = ch == '.' && digits_end == Some(i);
        if special || marker || enum_dot {
            out.push('\\');
        }
        out.push(ch);
    }
}

fn cell_to_typst(cell: &str, in_header: bool, out: &mut String) {
    let spans = split_spans(cell);
    if in_header {
        // Header cells are already strong, nested bold adds nothing
        out.push_str("#strong[");
        for (i, span) in spans.iter().enumerate() {
            escape_text(span.text(), i == 0, out);
        }
        out.push(']');
    } else {
        spans_to_typst(&spans, out);
    }
}

fn fill_expr(table: &TableConfig) -> Option<String> {
    let expr = match (&table.header_fill, &table.stripe_fill) {
        (None, None) => return None,
        (Some(header), None) => format!("(x, y) => if y == 0 {{ rgb(\"{header}\") }}"),
        (None, Some(stripe)) => {
            format!("(x, y) => if y > 0 and calc.even(y) {{ rgb(\"{stripe}\") }}")
        }
        (Some(header), Some(stripe)) => format!(
            "(x, y) => if y == 0 {{ rgb(\"{header}\") }} else if calc.even(y) {{ rgb(\"{stripe}\") }}"
        ),
    };
    Some(expr)
}

/// Without a header row the widest data row decides the column count.
fn column_count(headers: &[String], rows: &[Vec<String>]) -> usize {
    if headers.is_empty() {
        rows.iter().map(Vec::len).max().unwrap_or(0)
    } else {
        headers.len()
    }
}

fn table_to_typst(
    headers: &[String],
    rows: &[Vec<String>],
    col_count: usize,
    style: &TableConfig,
    out: &mut String,
) {
    out.push_str("#table(\n");
    out.push_str(&format!("  columns: {},\n", col_count));
    if let Some(fill) = fill_expr(style) {
        out.push_str(&format!("  fill: {},\n", fill));
    }

    for cell in headers {
        out.push_str("  [");
        cell_to_typst(cell, true, out);
        out.push_str("],\n");
    }

    for row in rows {
        for cell in fit_row(row, col_count) {
            out.push_str("  [");
            cell_to_typst(cell, false, out);
            out.push_str("],\n");
        }
    }

    out.push_str(")\n");
}
