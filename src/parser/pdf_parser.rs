//! PDF document reader producing glyph runs and logical lines.

use std::io::Read;
use std::path::Path;

use crate::detect::{pdf_version_from_bytes, pdf_version_from_path};
use crate::error::{Error, Result};
use crate::layout::{GlyphSink, LineMerger};
use crate::model::{GlyphRun, LogicalLine};

use super::backend::{LopdfBackend, PdfBackend};
use super::content::GlyphExtractor;
use super::options::{ErrorMode, ParseOptions};

/// PDF document reader.
pub struct PdfParser<B: PdfBackend = LopdfBackend> {
    backend: B,
    options: ParseOptions,
}

impl PdfParser<LopdfBackend> {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();

        // Verify it's a PDF
        let version = pdf_version_from_path(path)?;
        log::debug!("Opening {} (PDF {})", path.display(), version);

        let backend = LopdfBackend::load_file(path)?;
        Ok(Self::with_backend(backend, options))
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        pdf_version_from_bytes(data)?;
        let backend = LopdfBackend::load_bytes(data)?;
        Ok(Self::with_backend(backend, options))
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }
}

impl<B: PdfBackend> PdfParser<B> {
    /// Wrap an already-loaded backend.
    pub fn with_backend(backend: B, options: ParseOptions) -> Self {
        Self { backend, options }
    }

    /// Options in effect.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.backend.page_count()
    }

    /// Title from the document metadata, if any.
    pub fn metadata_title(&self) -> Option<String> {
        self.backend.metadata_title()
    }

    /// Push every page's glyph runs into `sink`, in page order.
    ///
    /// In lenient mode a page that fails to decode is logged and skipped;
    /// in strict mode the error is returned. Returns the number of runs.
    pub fn stream_glyphs<S: GlyphSink + ?Sized>(&self, sink: &mut S) -> Result<usize> {
        let extractor = GlyphExtractor::new(&self.backend);
        let mut total = 0;

        for (page_number, page_id) in self.backend.pages() {
            match extractor.extract_page(page_number, page_id, sink) {
                Ok(count) => {
                    log::debug!("Page {}: {} glyph runs", page_number, count);
                    total += count;
                }
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(Error::TextExtract(format!("Page {}: {}", page_number, e)));
                    }
                    log::warn!("Failed to extract text from page {}: {}", page_number, e);
                }
            }
        }

        Ok(total)
    }

    /// All glyph runs in emission order.
    pub fn glyph_runs(&self) -> Result<Vec<GlyphRun>> {
        let mut runs = Vec::new();
        self.stream_glyphs(&mut runs)?;
        Ok(runs)
    }

    /// Logical lines, sorted by page and Y.
    pub fn lines(&self) -> Result<Vec<LogicalLine>> {
        let mut merger = LineMerger::new();
        self.stream_glyphs(&mut merger)?;
        Ok(merger.finish())
    }
}
