use log::{debug, trace};
use serde::Deserialize;

use crate::block::{Block, Document};
use crate::inline::split_spans;
use crate::line::{LineKind, classify};
use crate::table::{self, SeparatorPolicy};

/// Knobs for [`parse_with_options`]. Deserialized from the `[parser]` config table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Emit a [`Block::Spacer`] for each run of blank lines between two blocks.
    pub spacers: bool,
    pub table_separator: SeparatorPolicy,
}

/// Parse report text into a document using default options
pub fn parse(text: &str) -> Document {
    parse_with_options(text, &ParseOptions::default())
}

/// Parse report text into a document.
///
/// Never fails: anything that is not a header, list item or table ends up as
/// a paragraph holding the line's spans.
pub fn parse_with_options(text: &str, options: &ParseOptions) -> Document {
    let lines: Vec<&str> = text.lines().collect();
    let mut state = ParseState::new(options);
    let mut mode = Mode::Scanning;

    while state.cursor < lines.len() {
        mode = match mode {
            Mode::Scanning => state.scan(&lines),
            Mode::InTable => state.take_table(&lines),
        };
    }

    debug!(
        "parsed {} lines into {} blocks",
        lines.len(),
        state.blocks.len()
    );
    Document::new(state.blocks)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Scanning,
    InTable,
}

struct ParseState<'o> {
    options: &'o ParseOptions,
    cursor: usize,
    blocks: Vec<Block>,
    // A blank run was seen since the last emitted block
    after_blank: bool,
}

impl<'o> ParseState<'o> {
    fn new(options: &'o ParseOptions) -> Self {
        Self {
            options,
            cursor: 0,
            blocks: Vec::new(),
            after_blank: false,
        }
    }

    fn scan(&mut self, lines: &[&str]) -> Mode {
        let line = lines[self.cursor];
        let next = lines.get(self.cursor + 1).copied();
        let kind = classify(line, next);
        trace!("line {}: {:?}", self.cursor + 1, kind);

        let block = match kind {
            LineKind::Blank => {
                self.after_blank = !self.blocks.is_empty();
                self.cursor += 1;
                return Mode::Scanning;
            }
            LineKind::TableRow { .. } => return Mode::InTable,
            LineKind::Header { level, text } => Block::header(level, split_spans(text)),
            LineKind::List { text } => Block::ListItem {
                content: split_spans(text),
            },
            LineKind::Plain { text } => Block::Paragraph {
                content: split_spans(text),
            },
        };

        self.emit(block);
        self.cursor += 1;
        Mode::Scanning
    }

    fn take_table(&mut self, lines: &[&str]) -> Mode {
        match table::accumulate(&lines[self.cursor..], self.options.table_separator) {
            Some((block, consumed)) => {
                self.emit(block);
                self.cursor += consumed;
            }
            None => {
                debug!(
                    "line {}: lone table row, keeping it as a paragraph",
                    self.cursor + 1
                );
                let content = split_spans(lines[self.cursor].trim());
                self.emit(Block::Paragraph { content });
                self.cursor += 1;
            }
        }
        Mode::Scanning
    }

    fn emit(&mut self, block: Block) {
        if self.after_blank && self.options.spacers {
            self.blocks.push(Block::Spacer);
        }
        self.after_blank = false;
        self.blocks.push(block);
    }
}
