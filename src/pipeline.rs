//! Single-document pipelines: outline extraction and persona ranking input.
//!
//! A document is read once into a [`DocumentText`] (logical lines plus the
//! metadata title). The outline path classifies those lines with
//! [`HeadingPolicy::BoldAware`]; the persona path uses
//! [`HeadingPolicy::SizeOnly`] and reads persona and job from page 1.

use std::path::Path;

use chrono::{DateTime, FixedOffset};

use crate::error::Result;
use crate::layout::{extract_headings, resolve_persona, resolve_title, HeadingPolicy};
use crate::model::{
    DocumentOutline, HeadingLine, LogicalLine, Persona, PersonaMetadata, PersonaReport,
    RankedSection,
};
use crate::parser::{ParseOptions, PdfBackend, PdfParser};
use crate::relevance::SectionRanker;

/// The text of one document, reconstructed into logical lines.
#[derive(Debug, Clone)]
pub struct DocumentText {
    /// Display name (the file name for documents read from disk)
    pub name: String,
    /// Title from the document information dictionary
    pub metadata_title: Option<String>,
    /// Number of pages
    pub page_count: u32,
    /// Logical lines sorted by (page, Y)
    pub lines: Vec<LogicalLine>,
}

impl DocumentText {
    /// Read a PDF file.
    pub fn read<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        let parser = PdfParser::open_with_options(path, options.clone())?;
        Self::from_parser(display_name(path), &parser)
    }

    /// Read the lines of an opened document.
    pub fn from_parser<B: PdfBackend>(
        name: impl Into<String>,
        parser: &PdfParser<B>,
    ) -> Result<Self> {
        let lines = parser.lines()?;
        Ok(Self {
            name: name.into(),
            metadata_title: parser.metadata_title(),
            page_count: parser.page_count(),
            lines,
        })
    }

    /// Build from lines that were produced elsewhere.
    pub fn from_lines(
        name: impl Into<String>,
        metadata_title: Option<String>,
        lines: Vec<LogicalLine>,
    ) -> Self {
        let page_count = lines.iter().map(|l| l.page).max().unwrap_or(0);
        Self {
            name: name.into(),
            metadata_title,
            page_count,
            lines,
        }
    }

    /// Title and bold-aware heading outline.
    pub fn outline(&self) -> DocumentOutline {
        outline_from_lines(self.metadata_title.as_deref(), &self.lines)
    }

    /// Headings classified by size only, for relevance ranking.
    pub fn persona_headings(&self) -> Vec<HeadingLine> {
        extract_headings(&self.lines, HeadingPolicy::SizeOnly)
    }

    /// Persona and job read from the first page.
    pub fn persona(&self) -> Persona {
        resolve_persona(&self.lines)
    }
}

/// File name of a path, for use in reports.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Outline of a document from its sorted logical lines.
pub fn outline_from_lines(metadata_title: Option<&str>, lines: &[LogicalLine]) -> DocumentOutline {
    let title = resolve_title(metadata_title, lines);
    let headings = extract_headings(lines, HeadingPolicy::BoldAware);
    log::debug!("Outline \"{}\": {} headings", title, headings.len());
    DocumentOutline::new(title, headings)
}

/// Extract the outline of a PDF file with default options.
pub fn extract_outline<P: AsRef<Path>>(path: P) -> Result<DocumentOutline> {
    extract_outline_with_options(path, &ParseOptions::default())
}

/// Extract the outline of a PDF file.
pub fn extract_outline_with_options<P: AsRef<Path>>(
    path: P,
    options: &ParseOptions,
) -> Result<DocumentOutline> {
    Ok(DocumentText::read(path, options)?.outline())
}

/// Logical lines of a PDF file, sorted by page and Y.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<LogicalLine>> {
    Ok(DocumentText::read(path, &ParseOptions::default())?.lines)
}

/// Rank the headings of a group of documents against the persona's job.
///
/// Persona and job come from the first document; each document's matches
/// are ranked on their own and appended in the given order.
pub fn persona_report(documents: &[DocumentText]) -> PersonaReport {
    let persona = documents
        .first()
        .map(DocumentText::persona)
        .unwrap_or_default();
    let (names, sections) = rank_group(&persona, documents);
    PersonaReport {
        metadata: PersonaMetadata::now(names, &persona),
        extracted_sections: sections,
    }
}

/// [`persona_report`] stamped with a fixed time.
pub fn persona_report_at(
    documents: &[DocumentText],
    timestamp: DateTime<FixedOffset>,
) -> PersonaReport {
    let persona = documents
        .first()
        .map(DocumentText::persona)
        .unwrap_or_default();
    let (names, sections) = rank_group(&persona, documents);
    PersonaReport {
        metadata: PersonaMetadata::new(names, &persona, timestamp),
        extracted_sections: sections,
    }
}

fn rank_group(
    persona: &Persona,
    documents: &[DocumentText],
) -> (Vec<String>, Vec<RankedSection>) {
    let mut ranker = SectionRanker::for_task(&persona.job);
    log::debug!("Ranking against {} keywords", ranker.keywords().len());

    for doc in documents {
        let added = ranker.add_document(&doc.name, &doc.persona_headings());
        log::debug!("{}: {} relevant sections", doc.name, added);
    }

    let names = documents.iter().map(|d| d.name.clone()).collect();
    (names, ranker.finish())
}
