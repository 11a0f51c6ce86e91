//! # pdf-outline
//!
//! Heading outlines and persona-driven section ranking for PDF documents.
//!
//! Glyph runs are read from page content streams, merged into logical
//! lines, and classified into H1/H2/H3 headings relative to the document's
//! body font size. A document title is resolved from metadata or from the
//! largest text on page 1. For a group of documents, headings are scored
//! against the keywords of a task description and ranked.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_outline::{extract_outline, render};
//!
//! fn main() -> pdf_outline::Result<()> {
//!     let outline = extract_outline("document.pdf")?;
//!     println!("{}", outline.title);
//!
//!     let json = render::to_json(&outline, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Batch processing
//!
//! ```no_run
//! use pdf_outline::{run_outline_batch, BatchConfig};
//!
//! let report = run_outline_batch(&BatchConfig::new("input", "output"))?;
//! println!("{} files written", report.written.len());
//! # Ok::<(), pdf_outline::Error>(())
//! ```

pub mod batch;
pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod relevance;
pub mod render;

// Re-export commonly used types
pub use batch::{
    run_outline_batch, run_outline_batch_with_progress, run_persona_batch,
    run_persona_batch_with_progress, BatchConfig, BatchEvent, BatchReport, SkipReason,
    SkippedDocument,
};
pub use detect::{has_pdf_extension, pdf_version_from_bytes, pdf_version_from_path};
pub use error::{Error, Result};
pub use layout::{GlyphSink, HeadingClassifier, HeadingPolicy, LineMerger};
pub use model::{
    DocumentOutline, GlyphRun, HeadingLevel, HeadingLine, LogicalLine, Persona, PersonaReport,
    RankedSection,
};
pub use parser::{ErrorMode, ParseOptions, PdfParser};
pub use pipeline::{
    extract_outline, extract_outline_with_options, outline_from_lines, persona_report,
    read_lines, DocumentText,
};
pub use relevance::{KeywordSet, SectionRanker};
pub use render::JsonFormat;

use std::path::Path;

/// Extract the outline of a PDF held in memory.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::outline_from_bytes;
///
/// let data = std::fs::read("document.pdf").unwrap();
/// let outline = outline_from_bytes(&data).unwrap();
/// println!("{} headings", outline.len());
/// ```
pub fn outline_from_bytes(data: &[u8]) -> Result<DocumentOutline> {
    let parser = PdfParser::from_bytes(data)?;
    Ok(DocumentText::from_parser("", &parser)?.outline())
}

/// Convert a PDF file to outline JSON.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::{outline_json, JsonFormat};
///
/// let json = outline_json("document.pdf", JsonFormat::Pretty).unwrap();
/// std::fs::write("document.json", json).unwrap();
/// ```
pub fn outline_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let outline = extract_outline(path)?;
    render::to_json(&outline, format)
}

/// Builder for the single-document outline pipeline.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::Outliner;
///
/// let json = Outliner::new()
///     .strict()
///     .compact()
///     .extract("document.pdf")?
///     .to_json()?;
/// # Ok::<(), pdf_outline::Error>(())
/// ```
pub struct Outliner {
    parse_options: ParseOptions,
    format: JsonFormat,
}

impl Outliner {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            format: JsonFormat::Pretty,
        }
    }

    /// Fail on the first undecodable page.
    pub fn strict(mut self) -> Self {
        self.parse_options = self.parse_options.strict();
        self
    }

    /// Skip undecodable pages.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Write compact JSON.
    pub fn compact(mut self) -> Self {
        self.format = JsonFormat::Compact;
        self
    }

    /// Read a PDF file.
    pub fn extract<P: AsRef<Path>>(self, path: P) -> Result<OutlineResult> {
        let document = DocumentText::read(path, &self.parse_options)?;
        Ok(OutlineResult {
            outline: document.outline(),
            document,
            format: self.format,
        })
    }

    /// Read a PDF from bytes.
    pub fn extract_bytes(self, data: &[u8]) -> Result<OutlineResult> {
        let parser = PdfParser::from_bytes_with_options(data, self.parse_options)?;
        let document = DocumentText::from_parser("", &parser)?;
        Ok(OutlineResult {
            outline: document.outline(),
            document,
            format: self.format,
        })
    }
}

impl Default for Outliner {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of the outline pipeline for one document.
pub struct OutlineResult {
    /// Title and headings
    pub outline: DocumentOutline,
    /// The logical lines the outline was built from
    document: DocumentText,
    format: JsonFormat,
}

impl OutlineResult {
    /// Serialize the outline.
    pub fn to_json(&self) -> Result<String> {
        render::to_json(&self.outline, self.format)
    }

    /// Logical lines of the document.
    pub fn lines(&self) -> &[LogicalLine] {
        &self.document.lines
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.document.page_count
    }
}
