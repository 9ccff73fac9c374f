use serde::Serialize;

/// Deepest heading style a report distinguishes; deeper `#` runs collapse into it.
pub const MAX_HEADER_LEVEL: u8 = 4;

/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Span {
    Plain { text: String },
    Bold { text: String },
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Span::Plain { text: text.into() }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Span::Bold { text: text.into() }
    }

    pub fn text(&self) -> &str {
        match self {
            Span::Plain { text } | Span::Bold { text } => text,
        }
    }
}

/// Block-level elements parsed from a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header {
        level: u8,
        content: Vec<Span>,
    },
    Paragraph {
        content: Vec<Span>,
    },
    ListItem {
        content: Vec<Span>,
    },
    /// Cells are raw strings; rows may be shorter or longer than `headers`.
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Spacer,
}

impl Block {
    /// Build a header, clamping the `#` count into `1..=MAX_HEADER_LEVEL`.
    pub fn header(level: usize, content: Vec<Span>) -> Self {
        let level = level.clamp(1, MAX_HEADER_LEVEL as usize) as u8;
        Block::Header { level, content }
    }

    /// Inline content for headers, paragraphs and list items.
    pub fn spans(&self) -> Option<&[Span]> {
        match self {
            Block::Header { content, .. }
            | Block::Paragraph { content }
            | Block::ListItem { content } => Some(content.as_slice()),
            Block::Table { .. } | Block::Spacer => None,
        }
    }

    /// Concatenated span text, with bold markers removed.
    pub fn plain_text(&self) -> String {
        self.spans()
            .map(|spans| spans.iter().map(Span::text).collect())
            .unwrap_or_default()
    }
}

/// The ordered blocks produced by one parse call.
///
/// There is no way to add, remove or edit blocks once a document has been
/// built; renderers only ever see it by shared reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub(crate) fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

impl IntoIterator for Document {
    type Item = Block;
    type IntoIter = std::vec::IntoIter<Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn header_level_is_clamped() {
        assert_eq!(Block::header(0, vec![]), Block::Header { level: 1, content: vec![] });
        assert_eq!(Block::header(3, vec![]), Block::Header { level: 3, content: vec![] });
        assert_eq!(Block::header(9, vec![]), Block::Header { level: 4, content: vec![] });
    }

    #[test]
    fn plain_text_drops_markers() {
        let block = Block::Paragraph {
            content: vec![Span::plain("a "), Span::bold("b"), Span::plain(" c")],
        };
        assert_eq!(block.plain_text(), "a b c");
        assert_eq!(Block::Spacer.plain_text(), "");
    }

    #[test]
    fn serializes_tagged() {
        let doc = Document::new(vec![
            Block::header(2, vec![Span::bold("Rank")]),
            Block::Spacer,
            Block::Table {
                headers: vec!["IIT".into()],
                rows: vec![vec!["Bombay".into()]],
            },
        ]);
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(
            json,
            r#"[{"type":"header","level":2,"content":[{"type":"bold","text":"Rank"}]},{"type":"spacer"},{"type":"table","headers":["IIT"],"rows":[["Bombay"]]}]"#
        );
    }
}
