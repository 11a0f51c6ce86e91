//! Heading and outline types for the single-document path.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading level, ordered H1 > H2 > H3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Tag used in the JSON artifact.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line classified as a heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingLine {
    pub level: HeadingLevel,
    pub text: String,
    pub page: u32,
}

impl HeadingLine {
    /// Create a heading line.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Title plus headings in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentOutline {
    pub title: String,
    pub outline: Vec<HeadingLine>,
}

impl DocumentOutline {
    /// Create an outline.
    pub fn new(title: impl Into<String>, outline: Vec<HeadingLine>) -> Self {
        Self {
            title: title.into(),
            outline,
        }
    }

    /// Number of headings.
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    /// Whether no heading was detected.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    /// Headings at a given level.
    pub fn headings_at(&self, level: HeadingLevel) -> impl Iterator<Item = &HeadingLine> {
        self.outline.iter().filter(move |h| h.level == level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let outline = DocumentOutline::new(
            "Report",
            vec![HeadingLine::new(HeadingLevel::H2, "Scope", 3)],
        );
        let json = serde_json::to_value(&outline).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Report",
                "outline": [{ "level": "H2", "text": "Scope", "page": 3 }]
            })
        );
    }

    #[test]
    fn test_headings_at() {
        let outline = DocumentOutline::new(
            "T",
            vec![
                HeadingLine::new(HeadingLevel::H1, "A", 1),
                HeadingLine::new(HeadingLevel::H3, "B", 1),
                HeadingLine::new(HeadingLevel::H1, "C", 2),
            ],
        );
        let texts: Vec<_> = outline
            .headings_at(HeadingLevel::H1)
            .map(|h| h.text.as_str())
            .collect();
        assert_eq!(texts, vec!["A", "C"]);
        assert_eq!(outline.len(), 3);
    }
}
