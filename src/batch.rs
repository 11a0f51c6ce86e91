//! Directory batch runners.
//!
//! The outline runner writes one `<stem>.json` per PDF found under the
//! input directory. The persona runner treats every direct subdirectory of
//! the input directory as a group (for example one per language) and writes
//! `<group>/round1b_output.json` for each.
//!
//! Failures are isolated per document: a PDF that cannot be read, or that
//! is over the page limit, is recorded in the [`BatchReport`] and the run
//! continues. Only a missing input directory or an output directory that
//! cannot be created stop a run.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::detect::has_pdf_extension;
use crate::error::{Error, Result};
use crate::parser::{ParseOptions, PdfParser};
use crate::pipeline::{display_name, persona_report, DocumentText};
use crate::render::{write_json, JsonFormat};

/// File name of the persona report written for each group.
pub const PERSONA_REPORT_FILE: &str = "round1b_output.json";

/// Configuration of a batch run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory scanned for PDF files
    pub input_dir: PathBuf,
    /// Directory receiving the JSON artifacts
    pub output_dir: PathBuf,
    /// Options used to read each document
    pub parse_options: ParseOptions,
    /// JSON layout of the artifacts
    pub format: JsonFormat,
    /// Process documents on the rayon thread pool
    pub parallel: bool,
}

impl BatchConfig {
    /// Configuration with default options.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            parse_options: ParseOptions::default(),
            format: JsonFormat::Pretty,
            parallel: false,
        }
    }

    /// Set parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Set JSON format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Write compact JSON.
    pub fn compact(mut self) -> Self {
        self.format = JsonFormat::Compact;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Why a document produced no output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The document has more pages than the configured limit.
    TooManyPages(u32),
    /// Reading or writing failed.
    Failed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TooManyPages(pages) => write!(f, "too many pages ({})", pages),
            SkipReason::Failed(message) => f.write_str(message),
        }
    }
}

/// A document that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDocument {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Artifacts written, in processing order
    pub written: Vec<PathBuf>,
    /// Documents that produced no output
    pub skipped: Vec<SkippedDocument>,
}

impl BatchReport {
    /// Whether every document was processed.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    fn skip(&mut self, path: &Path, reason: SkipReason) {
        self.skipped.push(SkippedDocument {
            path: path.to_path_buf(),
            reason,
        });
    }
}

/// Progress notifications emitted during a run.
#[derive(Debug, Clone, Copy)]
pub enum BatchEvent<'a> {
    /// Documents of a run (or of one persona group) were collected.
    Started { total: usize },
    /// A document finished, successfully or not.
    DocumentDone { path: &'a Path, ok: bool },
}

/// Progress callback; called from worker threads when running in parallel.
pub type BatchCallback<'a> = &'a (dyn Fn(&BatchEvent<'_>) + Sync);

/// Run the outline pipeline over every PDF under the input directory.
pub fn run_outline_batch(config: &BatchConfig) -> Result<BatchReport> {
    run_outline_batch_with_progress(config, &|_: &BatchEvent<'_>| {})
}

/// [`run_outline_batch`] with a progress callback.
pub fn run_outline_batch_with_progress(
    config: &BatchConfig,
    progress: BatchCallback<'_>,
) -> Result<BatchReport> {
    prepare_dirs(config)?;
    let paths = collect_pdfs(&config.input_dir);
    log::info!(
        "Found {} PDF files in {}",
        paths.len(),
        config.input_dir.display()
    );
    progress(&BatchEvent::Started { total: paths.len() });

    let outcomes = map_documents(&paths, config.parallel, |path| {
        let outcome = outline_document(path, config);
        progress(&BatchEvent::DocumentDone {
            path,
            ok: outcome.is_ok(),
        });
        outcome
    });

    let mut report = BatchReport::default();
    for (path, outcome) in paths.iter().zip(outcomes) {
        match outcome {
            Ok(written) => report.written.push(written),
            Err(reason) => report.skip(path, reason),
        }
    }
    Ok(report)
}

/// Run the persona pipeline over each group of the input directory.
///
/// Groups are the direct subdirectories of the input directory; when there
/// are none, the input directory itself is the only group and its report is
/// written directly into the output directory.
pub fn run_persona_batch(config: &BatchConfig) -> Result<BatchReport> {
    run_persona_batch_with_progress(config, &|_: &BatchEvent<'_>| {})
}

/// [`run_persona_batch`] with a progress callback.
pub fn run_persona_batch_with_progress(
    config: &BatchConfig,
    progress: BatchCallback<'_>,
) -> Result<BatchReport> {
    prepare_dirs(config)?;

    let mut report = BatchReport::default();
    for (group_dir, out_dir) in persona_groups(config)? {
        let paths = collect_pdfs(&group_dir);
        log::info!(
            "Processing group {} ({} PDF files)",
            group_dir.display(),
            paths.len()
        );
        progress(&BatchEvent::Started { total: paths.len() });

        let loaded = map_documents(&paths, config.parallel, |path| {
            let outcome = load_document(path, &config.parse_options);
            progress(&BatchEvent::DocumentDone {
                path,
                ok: outcome.is_ok(),
            });
            outcome
        });

        let mut documents = Vec::with_capacity(loaded.len());
        for (path, outcome) in paths.iter().zip(loaded) {
            match outcome {
                Ok(document) => documents.push(document),
                Err(reason) => report.skip(path, reason),
            }
        }

        // Every enumerated PDF is listed, including skipped ones.
        let mut group_report = persona_report(&documents);
        group_report.metadata.documents = paths.iter().map(|p| display_name(p)).collect();
        log::info!(
            "Persona \"{}\", job \"{}\": {} ranked sections",
            group_report.metadata.persona,
            group_report.metadata.job_to_be_done,
            group_report.extracted_sections.len()
        );

        let target = out_dir.join(PERSONA_REPORT_FILE);
        match write_json(&target, &group_report, config.format) {
            Ok(()) => report.written.push(target),
            Err(e) => {
                log::warn!("Failed to write {}: {}", target.display(), e);
                report.skip(&group_dir, SkipReason::Failed(e.to_string()));
            }
        }
    }
    Ok(report)
}

/// PDF files under `dir`, recursively, sorted by path.
pub fn collect_pdfs(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && has_pdf_extension(e.path()))
        .map(|e| e.into_path())
        .collect()
}

fn prepare_dirs(config: &BatchConfig) -> Result<()> {
    if !config.input_dir.is_dir() {
        return Err(Error::InputNotFound(config.input_dir.clone()));
    }
    fs::create_dir_all(&config.output_dir).map_err(|source| Error::OutputDir {
        path: config.output_dir.clone(),
        source,
    })
}

/// (group input dir, group output dir) pairs, sorted by name.
fn persona_groups(config: &BatchConfig) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut groups: Vec<(PathBuf, PathBuf)> = WalkDir::new(&config.input_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
        .map(|e| {
            let out = config.output_dir.join(e.file_name());
            (e.into_path(), out)
        })
        .collect();

    if groups.is_empty() {
        groups.push((config.input_dir.clone(), config.output_dir.clone()));
    }
    for (_, out) in &groups {
        fs::create_dir_all(out).map_err(|source| Error::OutputDir {
            path: out.clone(),
            source,
        })?;
    }
    Ok(groups)
}

fn map_documents<T, F>(paths: &[PathBuf], parallel: bool, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(&Path) -> T + Sync + Send,
{
    if parallel {
        paths.par_iter().map(|p| f(p.as_path())).collect()
    } else {
        paths.iter().map(|p| f(p.as_path())).collect()
    }
}

/// Open a document, apply the page limit and read its lines.
fn load_document(
    path: &Path,
    options: &ParseOptions,
) -> std::result::Result<DocumentText, SkipReason> {
    let parser =
        PdfParser::open_with_options(path, options.clone()).map_err(|e| failed(path, e))?;

    let pages = parser.page_count();
    if options.exceeds_page_limit(pages) {
        log::info!("Skipping {}: {} pages", path.display(), pages);
        return Err(SkipReason::TooManyPages(pages));
    }

    DocumentText::from_parser(display_name(path), &parser).map_err(|e| failed(path, e))
}

fn outline_document(
    path: &Path,
    config: &BatchConfig,
) -> std::result::Result<PathBuf, SkipReason> {
    let document = load_document(path, &config.parse_options)?;
    let outline = document.outline();

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| document.name.clone());
    let target = config.output_dir.join(format!("{}.json", stem));

    write_json(&target, &outline, config.format).map_err(|e| failed(path, e))?;
    log::info!(
        "Processed {} -> {} ({} headings)",
        path.display(),
        target.display(),
        outline.len()
    );
    Ok(target)
}

fn failed(path: &Path, e: Error) -> SkipReason {
    log::warn!("Failed to process {}: {}", path.display(), e);
    SkipReason::Failed(e.to_string())
}
