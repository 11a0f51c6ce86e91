//! Logical lines reconstructed from glyph runs.

use std::fmt;

use super::GlyphRun;

/// A visual line of text formed by merging adjacent glyph runs.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalLine {
    /// Accumulated text
    pub text: String,
    /// Y of the run that started the line
    pub y: f32,
    /// X of the run that started the line
    pub x: f32,
    /// Rightmost X seen so far
    pub max_x: f32,
    /// Largest font size among merged runs
    pub font_size: f32,
    /// True once any merged run used a bold font
    pub is_bold: bool,
    /// Page number (1-indexed)
    pub page: u32,
}

impl LogicalLine {
    /// Start a new line from a run. The run's text is trimmed.
    pub fn start(run: &GlyphRun) -> Self {
        Self {
            text: run.text.trim().to_string(),
            y: run.y,
            x: run.left_x,
            max_x: run.right_x,
            font_size: run.font_size,
            is_bold: run.is_bold(),
            page: run.page,
        }
    }

    /// Append a run to this line. Text is appended verbatim.
    pub fn absorb(&mut self, run: &GlyphRun) {
        self.text.push_str(&run.text);
        self.max_x = run.right_x;
        self.font_size = self.font_size.max(run.font_size);
        self.is_bold = self.is_bold || run.is_bold();
    }
}

impl fmt::Display for LogicalLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Page {}, Y={:.2}, X={:.2}, Size={:.2}, Bold={}: \"{}\"",
            self.page, self.y, self.x, self.font_size, self.is_bold, self.text
        )
    }
}
