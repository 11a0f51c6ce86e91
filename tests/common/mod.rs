//! Synthetic PDF fixtures built with lopdf.

#![allow(dead_code)]

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Resource name of the regular font.
pub const REGULAR: &str = "F1";
/// Resource name of the bold font.
pub const BOLD: &str = "F2";

/// One piece of text placed on a page (PDF coordinates, origin bottom-left).
#[derive(Debug, Clone)]
pub struct Text {
    pub font: &'static str,
    pub size: i64,
    pub x: i64,
    pub y: i64,
    pub text: String,
}

pub fn regular(size: i64, x: i64, y: i64, text: &str) -> Text {
    Text {
        font: REGULAR,
        size,
        x,
        y,
        text: text.to_string(),
    }
}

pub fn bold(size: i64, x: i64, y: i64, text: &str) -> Text {
    Text {
        font: BOLD,
        ..regular(size, x, y, text)
    }
}

/// Body paragraph lines at 10pt starting at `y`, 14pt apart.
pub fn body(count: usize, y: i64) -> Vec<Text> {
    (0..count)
        .map(|i| regular(10, 72, y - 14 * i as i64, "Body text of the document."))
        .collect()
}

/// Build a PDF with one 612x792 page per entry of `pages`.
pub fn build_pdf(pages: &[Vec<Text>], title: Option<&str>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR => regular_id,
            BOLD => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for texts in pages {
        let mut operations = Vec::new();
        for t in texts {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec![t.font.into(), t.size.into()]));
            operations.push(Operation::new("Td", vec![t.x.into(), t.y.into()]));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(t.text.as_str())],
            ));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if let Some(title) = title {
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(title),
        });
        doc.trailer.set("Info", info_id);
    }

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("save pdf");
    bytes
}

pub fn write_pdf(path: &Path, pages: &[Vec<Text>], title: Option<&str>) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create fixture dir");
    }
    std::fs::write(path, build_pdf(pages, title)).expect("write fixture");
}

/// A two-page report with headings at every level.
pub fn report_pages() -> Vec<Vec<Text>> {
    let mut page1 = vec![bold(24, 72, 720, "Annual Report")];
    page1.extend(body(4, 680));
    page1.push(bold(18, 72, 600, "Introduction"));
    page1.extend(body(1, 580));
    page1.push(bold(12, 72, 560, "Scope"));
    page1.push(bold(14, 72, 540, "Goals"));
    page1.extend(body(2, 520));

    let mut page2 = vec![regular(20, 72, 720, "Large Plain Heading")];
    page2.push(regular(15, 72, 690, "Slightly larger text"));
    page2.extend(body(2, 660));
    // Two runs on one baseline, close enough to merge.
    page2.push(regular(10, 72, 600, "Hello"));
    page2.push(regular(10, 98, 600, " World"));

    vec![page1, page2]
}

/// `count` pages with one body line each.
pub fn long_pages(count: usize) -> Vec<Vec<Text>> {
    (0..count).map(|_| body(1, 700)).collect()
}
