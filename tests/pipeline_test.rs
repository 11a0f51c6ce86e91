//! Integration tests for the single-document pipelines on synthetic PDFs.

mod common;

use common::{body, bold, build_pdf, regular, report_pages, write_pdf};
use pdf_outline::{
    extract_outline, outline_from_bytes, persona_report, DocumentText, HeadingLevel, HeadingLine,
    Outliner, ParseOptions, PdfParser,
};

#[test]
fn test_glyph_runs_positions() {
    let bytes = build_pdf(&[vec![bold(24, 72, 720, "Annual Report")]], None);
    let parser = PdfParser::from_bytes(&bytes).unwrap();

    assert_eq!(parser.page_count(), 1);
    let runs = parser.glyph_runs().unwrap();
    assert_eq!(runs.len(), 1);

    let run = &runs[0];
    assert_eq!(run.text, "Annual Report");
    assert_eq!(run.page, 1);
    assert_eq!(run.y, 72.0);
    assert_eq!(run.left_x, 72.0);
    assert_eq!(run.font_size, 24.0);
    assert!(run.right_x > run.left_x);
    assert!(run.is_bold());
}

#[test]
fn test_lines_are_merged_and_sorted() {
    let bytes = build_pdf(&report_pages(), None);
    let parser = PdfParser::from_bytes(&bytes).unwrap();
    let lines = parser.lines().unwrap();

    assert_eq!(lines.first().unwrap().text, "Annual Report");
    assert!(lines
        .windows(2)
        .all(|w| (w[0].page, w[0].y) <= (w[1].page, w[1].y)));

    let merged = lines.iter().find(|l| l.text.starts_with("Hello")).unwrap();
    assert_eq!(merged.text, "Hello World");
    assert_eq!(merged.page, 2);
}

#[test]
fn test_outline_of_report() {
    let outline = outline_from_bytes(&build_pdf(&report_pages(), None)).unwrap();

    assert_eq!(outline.title, "Annual Report");
    assert_eq!(
        outline.outline,
        vec![
            HeadingLine::new(HeadingLevel::H1, "Annual Report", 1),
            HeadingLine::new(HeadingLevel::H1, "Introduction", 1),
            HeadingLine::new(HeadingLevel::H3, "Scope", 1),
            HeadingLine::new(HeadingLevel::H2, "Goals", 1),
            HeadingLine::new(HeadingLevel::H1, "Large Plain Heading", 2),
        ]
    );
}

#[test]
fn test_metadata_title_preferred() {
    let outline =
        outline_from_bytes(&build_pdf(&report_pages(), Some("Official Title"))).unwrap();
    assert_eq!(outline.title, "Official Title");
}

#[test]
fn test_blank_metadata_title_ignored() {
    let outline = outline_from_bytes(&build_pdf(&report_pages(), Some("   "))).unwrap();
    assert_eq!(outline.title, "Annual Report");
}

#[test]
fn test_empty_document_is_untitled() {
    let outline = outline_from_bytes(&build_pdf(&[vec![]], None)).unwrap();
    assert_eq!(outline.title, "Untitled Document");
    assert!(outline.is_empty());
}

#[test]
fn test_title_only_from_first_page() {
    let pages = vec![
        body(3, 700),
        vec![bold(30, 72, 720, "Second Page Banner")],
    ];
    let outline = outline_from_bytes(&build_pdf(&pages, None)).unwrap();
    assert_eq!(outline.title, "Body text of the document.");
}

#[test]
fn test_extract_outline_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    write_pdf(&path, &report_pages(), None);

    let outline = extract_outline(&path).unwrap();
    assert_eq!(outline.len(), 5);

    let result = Outliner::new().compact().extract(&path).unwrap();
    assert_eq!(result.page_count(), 2);
    let json = result.to_json().unwrap();
    assert!(json.starts_with(r#"{"title":"Annual Report","outline":[{"level":"H1""#));
}

#[test]
fn test_persona_from_first_page_lines() {
    let mut page = vec![
        regular(10, 72, 750, "Travel Planner"),
        regular(10, 72, 730, "Plan a trip for college friends"),
    ];
    page.extend(body(3, 700));
    page.push(bold(18, 72, 640, "Trip budget"));
    page.push(bold(18, 72, 600, "Museum hours"));

    let parser = PdfParser::from_bytes(&build_pdf(&[page], None)).unwrap();
    let document = DocumentText::from_parser("guide.pdf", &parser).unwrap();

    let persona = document.persona();
    assert_eq!(persona.role, "Travel Planner");
    assert_eq!(persona.job, "Plan a trip for college friends");

    let report = persona_report(&[document]);
    assert_eq!(report.extracted_sections.len(), 1);
    assert_eq!(report.extracted_sections[0].section_title, "Trip budget");
    assert_eq!(report.extracted_sections[0].importance_rank, 1);
    assert_eq!(report.metadata.documents, vec!["guide.pdf"]);
}

#[test]
fn test_strict_mode_reads_valid_document() {
    let bytes = build_pdf(&report_pages(), None);
    let parser =
        PdfParser::from_bytes_with_options(&bytes, ParseOptions::new().strict()).unwrap();
    assert!(!parser.lines().unwrap().is_empty());
}
