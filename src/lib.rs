mod block;
mod config;
mod error;
mod inline;
mod json;
mod line;
mod parser;
mod render;
mod table;
mod text;
mod typst;

pub use block::{Block, Document, MAX_HEADER_LEVEL, Span};
pub use config::{Config, FontConfig, PageConfig, SpacingConfig, TableConfig};
pub use error::{Error, Result};
pub use inline::split_spans;
pub use json::JsonRenderer;
pub use line::{LineKind, classify};
pub use parser::{ParseOptions, parse, parse_with_options};
pub use render::Renderer;
pub use table::SeparatorPolicy;
pub use text::TextRenderer;
pub use typst::TypstRenderer;

use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_pdf::PdfOptions;

/// Convert report text to Typst markup using the bundled config.
pub fn report_to_typst(report: &str) -> String {
    report_to_typst_with_config(report, &Config::compiled_default())
}

/// Convert report text to Typst markup with custom config.
pub fn report_to_typst_with_config(report: &str, config: &Config) -> String {
    let document = parse_with_options(report, &config.parser);
    typst::blocks_to_typst(document.blocks(), config)
}

/// Convert report text to PDF bytes using the bundled config.
pub fn report_to_pdf(report: &str) -> Result<Vec<u8>> {
    report_to_pdf_with_config(report, &Config::compiled_default())
}

/// Convert report text to PDF bytes with custom config.
pub fn report_to_pdf_with_config(report: &str, config: &Config) -> Result<Vec<u8>> {
    let document = parse_with_options(report, &config.parser);
    document_to_pdf(&document, config)
}

/// Typeset an already parsed document to PDF bytes.
pub fn document_to_pdf(document: &Document, config: &Config) -> Result<Vec<u8>> {
    use typst_library::layout::PagedDocument;

    let typst_content = typst::blocks_to_typst(document.blocks(), config);

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(false);

    let engine = TypstEngine::builder()
        .main_file(typst_content)
        .search_fonts_with(font_options)
        .build();

    let doc: PagedDocument = engine
        .compile()
        .output
        .map_err(|e| Error::Compile(format!("{:?}", e)))?;

    typst_pdf::pdf(&doc, &PdfOptions::default()).map_err(|e| Error::Pdf(format!("{:?}", e)))
}
