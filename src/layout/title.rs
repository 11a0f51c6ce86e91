//! Title and persona resolution from page-one lines.

use crate::model::{LogicalLine, Persona, UNKNOWN_JOB, UNKNOWN_PERSONA};

/// Title used when neither metadata nor page one yields one.
pub const UNTITLED: &str = "Untitled Document";

/// Pick a document title.
///
/// A non-empty metadata title (trimmed) wins. Otherwise the text of the
/// line with the strictly largest font size on page one is used; `lines`
/// must be sorted by (page, Y) so page one comes first.
pub fn resolve_title(metadata_title: Option<&str>, lines: &[LogicalLine]) -> String {
    if let Some(title) = metadata_title.map(str::trim).filter(|t| !t.is_empty()) {
        return title.to_string();
    }

    let mut max_size = 0.0_f32;
    let mut title = UNTITLED;
    for line in lines.iter().take_while(|l| l.page == 1) {
        if line.font_size > max_size {
            max_size = line.font_size;
            title = &line.text;
        }
    }
    title.to_string()
}

/// Persona and job from the first two non-empty page-one lines.
pub fn resolve_persona(lines: &[LogicalLine]) -> Persona {
    let mut texts = lines
        .iter()
        .take_while(|l| l.page == 1)
        .map(|l| l.text.trim())
        .filter(|t| !t.is_empty());

    let role = texts.next().unwrap_or(UNKNOWN_PERSONA);
    let job = texts.next().unwrap_or(UNKNOWN_JOB);
    Persona::new(role, job)
}
