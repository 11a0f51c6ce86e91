//! PDF parsing module: glyph runs from page content streams.

mod backend;
mod content;
mod options;
mod pdf_parser;

pub use backend::{
    decode_text_simple, BackendFontInfo, ContentOp, LopdfBackend, PageId, PdfBackend, PdfValue,
    SimpleWidths, DEFAULT_PAGE_SIZE,
};
pub use content::{GlyphExtractor, Matrix};
pub use options::{ErrorMode, ParseOptions, DEFAULT_MAX_PAGES};
pub use pdf_parser::PdfParser;
