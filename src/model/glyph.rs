//! Positioned glyph runs as emitted by the extraction layer.

/// A contiguous run of rendered text with uniform position and font.
///
/// Coordinates follow reading direction: `y` grows downward from the top
/// of the page, so sorting by ascending `y` walks a page top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRun {
    /// Text of the run, exactly as decoded
    pub text: String,
    /// Baseline-adjusted Y position (top-down)
    pub y: f32,
    /// X position of the first glyph
    pub left_x: f32,
    /// X position where the last glyph ends
    pub right_x: f32,
    /// Font size in points
    pub font_size: f32,
    /// Base font name (e.g., "Helvetica-Bold"), when the font is known
    pub font_name: Option<String>,
    /// Page number (1-indexed)
    pub page: u32,
}

impl GlyphRun {
    /// Create a glyph run.
    pub fn new(
        text: impl Into<String>,
        page: u32,
        y: f32,
        left_x: f32,
        right_x: f32,
        font_size: f32,
    ) -> Self {
        Self {
            text: text.into(),
            y,
            left_x,
            right_x,
            font_size,
            font_name: None,
            page,
        }
    }

    /// Set the font name.
    pub fn with_font(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = Some(font_name.into());
        self
    }

    /// Whether the run's font name contains "bold" (case-insensitive).
    pub fn is_bold(&self) -> bool {
        self.font_name
            .as_deref()
            .map(|name| name.to_lowercase().contains("bold"))
            .unwrap_or(false)
    }
}
