use crate::block::Document;
use crate::error::Result;

/// Turns a parsed document into some textual presentation.
///
/// Renderers only read the document; the block and span taxonomy is the
/// whole contract between them and the parser.
pub trait Renderer {
    fn render(&self, document: &Document) -> Result<String>;
}

/// Pad or cut a table row to exactly `width` cells.
pub(crate) fn fit_row(row: &[String], width: usize) -> impl Iterator<Item = &str> {
    row.iter()
        .map(String::as_str)
        .chain(std::iter::repeat(""))
        .take(width)
}
