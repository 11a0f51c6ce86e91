//! Parsing options and configuration.

/// Documents with more pages than this are skipped by the batch runners.
pub const DEFAULT_MAX_PAGES: u32 = 50;

/// Options for reading PDF documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Page count above which a document is skipped (`None` = no limit)
    pub max_pages: Option<u32>,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Fail the document on the first page that cannot be decoded.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Skip pages that cannot be decoded.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the page limit.
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Accept documents of any length.
    pub fn unlimited_pages(mut self) -> Self {
        self.max_pages = None;
        self
    }

    /// Whether a document with `page_count` pages is over the limit.
    pub fn exceeds_page_limit(&self, page_count: u32) -> bool {
        self.max_pages.is_some_and(|max| page_count > max)
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            max_pages: Some(DEFAULT_MAX_PAGES),
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    Strict,
    /// Skip invalid pages and continue
    #[default]
    Lenient,
}
