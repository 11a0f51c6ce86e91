//! Content stream interpretation into positioned glyph runs.
//!
//! Tracks the graphics state (`q`/`Q`/`cm`) and the text state
//! (`BT`/`ET`, `Tf`, `Td`, `TD`, `Tm`, `T*`, `TL`, `Tc`, `Tw`, `Tz`) and
//! emits one [`GlyphRun`] per text-showing operator (`Tj`, `TJ`, `'`, `"`).
//! Positions are converted to a top-down Y so that runs sort in reading
//! order.

use crate::error::Result;
use crate::layout::GlyphSink;
use crate::model::GlyphRun;

use super::backend::{decode_text_simple, BackendFontInfo, ContentOp, PageId, PdfBackend, PdfValue};

/// Advance (in em) assumed for glyphs whose width is unknown.
const FALLBACK_GLYPH_WIDTH: f32 = 0.5;

/// `TJ` adjustment (1/1000 em) beyond which a word space is inserted.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Affine transform `[a b c d e f]` in PDF row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    pub const fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub const fn translation(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// `self × other`: apply `self` first, then `other`.
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Transform a point.
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.a + y * self.c + self.e,
            x * self.b + y * self.d + self.f,
        )
    }

    /// Length of the transformed unit Y vector.
    pub fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }

    fn from_operands(op: &ContentOp) -> Option<Matrix> {
        Some(Matrix::new(
            op.number(0)?,
            op.number(1)?,
            op.number(2)?,
            op.number(3)?,
            op.number(4)?,
            op.number(5)?,
        ))
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Text state parameters saved and restored with the graphics state.
#[derive(Debug, Clone)]
struct TextParams {
    font: Option<usize>,
    font_size: f32,
    char_spacing: f32,
    word_spacing: f32,
    horizontal_scale: f32,
    leading: f32,
}

impl Default for TextParams {
    fn default() -> Self {
        Self {
            font: None,
            font_size: 0.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            horizontal_scale: 1.0,
            leading: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct GraphicsState {
    ctm: Matrix,
    text: TextParams,
}

/// Emits the glyph runs of a page into a [`GlyphSink`].
pub struct GlyphExtractor<'a, B: PdfBackend + ?Sized> {
    backend: &'a B,
}

impl<'a, B: PdfBackend + ?Sized> GlyphExtractor<'a, B> {
    /// Create an extractor over a backend.
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Interpret one page's content stream, pushing runs into `sink`.
    ///
    /// Returns the number of runs emitted.
    pub fn extract_page<S: GlyphSink + ?Sized>(
        &self,
        page_number: u32,
        page_id: PageId,
        sink: &mut S,
    ) -> Result<usize> {
        let fonts = self.backend.page_fonts(page_id)?;
        let content = self.backend.page_content(page_id)?;
        let ops = self.backend.decode_content(&content)?;
        let (_, page_height) = self.backend.page_size(page_id);

        let mut interpreter = PageInterpreter {
            backend: self.backend,
            page_id,
            page_number,
            page_height,
            fonts: &fonts,
            state: GraphicsState::default(),
            saved: Vec::new(),
            text_matrix: Matrix::IDENTITY,
            line_matrix: Matrix::IDENTITY,
            in_text: false,
            emitted: 0,
            sink,
        };
        for op in &ops {
            interpreter.execute(op);
        }
        Ok(interpreter.emitted)
    }
}

struct PageInterpreter<'p, B: PdfBackend + ?Sized, S: GlyphSink + ?Sized> {
    backend: &'p B,
    page_id: PageId,
    page_number: u32,
    page_height: f32,
    fonts: &'p [BackendFontInfo],
    state: GraphicsState,
    saved: Vec<GraphicsState>,
    text_matrix: Matrix,
    line_matrix: Matrix,
    in_text: bool,
    emitted: usize,
    sink: &'p mut S,
}

impl<B: PdfBackend + ?Sized, S: GlyphSink + ?Sized> PageInterpreter<'_, B, S> {
    fn execute(&mut self, op: &ContentOp) {
        match op.operator.as_str() {
            "q" => self.saved.push(self.state.clone()),
            "Q" => {
                if let Some(state) = self.saved.pop() {
                    self.state = state;
                }
            }
            "cm" => {
                if let Some(m) = Matrix::from_operands(op) {
                    self.state.ctm = m.multiply(&self.state.ctm);
                }
            }
            "BT" => {
                self.in_text = true;
                self.text_matrix = Matrix::IDENTITY;
                self.line_matrix = Matrix::IDENTITY;
            }
            "ET" => self.in_text = false,
            "Tf" => {
                if let Some(PdfValue::Name(name)) = op.operands.first() {
                    self.state.text.font = self.fonts.iter().position(|f| &f.name == name);
                }
                if let Some(size) = op.number(1) {
                    self.state.text.font_size = size;
                }
            }
            "Tc" => set_number(op, &mut self.state.text.char_spacing),
            "Tw" => set_number(op, &mut self.state.text.word_spacing),
            "TL" => set_number(op, &mut self.state.text.leading),
            "Tz" => {
                if let Some(scale) = op.number(0) {
                    self.state.text.horizontal_scale = scale / 100.0;
                }
            }
            "Td" => {
                if let (Some(tx), Some(ty)) = (op.number(0), op.number(1)) {
                    self.move_line(tx, ty);
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (op.number(0), op.number(1)) {
                    self.state.text.leading = -ty;
                    self.move_line(tx, ty);
                }
            }
            "Tm" => {
                if let Some(m) = Matrix::from_operands(op) {
                    self.text_matrix = m;
                    self.line_matrix = m;
                }
            }
            "T*" => self.next_line(),
            "Tj" => {
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    self.show_string(bytes);
                }
            }
            "TJ" => {
                if let Some(PdfValue::Array(items)) = op.operands.first() {
                    self.show_array(items);
                }
            }
            "'" => {
                self.next_line();
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    self.show_string(bytes);
                }
            }
            "\"" => {
                set_number(op, &mut self.state.text.word_spacing);
                if let Some(spacing) = op.number(1) {
                    self.state.text.char_spacing = spacing;
                }
                self.next_line();
                if let Some(PdfValue::Str(bytes)) = op.operands.get(2) {
                    self.show_string(bytes);
                }
            }
            _ => {}
        }
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = Matrix::translation(tx, ty).multiply(&self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        let leading = self.state.text.leading;
        self.move_line(0.0, -leading);
    }

    fn font(&self) -> Option<&BackendFontInfo> {
        self.state.text.font.and_then(|i| self.fonts.get(i))
    }

    fn device_position(&self) -> (f32, f32) {
        self.text_matrix.multiply(&self.state.ctm).apply(0.0, 0.0)
    }

    fn decode(&self, bytes: &[u8]) -> String {
        match self.font() {
            Some(font) => self.backend.decode_text(self.page_id, &font.name, bytes),
            None => decode_text_simple(bytes),
        }
    }

    /// Horizontal displacement of a string in unscaled text space.
    fn advance(&self, bytes: &[u8]) -> f32 {
        let params = &self.state.text;
        let font = self.font();
        let two_byte = font.map(|f| f.two_byte).unwrap_or(false);
        let widths = font.and_then(|f| f.widths.as_ref()).filter(|_| !two_byte);

        let glyph = |w0: f32, is_space: bool| {
            let word = if is_space { params.word_spacing } else { 0.0 };
            (w0 * params.font_size + params.char_spacing + word) * params.horizontal_scale
        };

        if two_byte {
            bytes
                .chunks(2)
                .map(|_| glyph(FALLBACK_GLYPH_WIDTH, false))
                .sum()
        } else {
            bytes
                .iter()
                .map(|&code| {
                    let w0 = widths
                        .map(|w| w.width(code) / 1000.0)
                        .unwrap_or(FALLBACK_GLYPH_WIDTH);
                    glyph(w0, code == b' ')
                })
                .sum()
        }
    }

    fn shift(&mut self, tx: f32) {
        self.text_matrix = Matrix::translation(tx, 0.0).multiply(&self.text_matrix);
    }

    fn show_string(&mut self, bytes: &[u8]) {
        if !self.in_text {
            return;
        }
        let start = self.device_position();
        let text = self.decode(bytes);
        let advance = self.advance(bytes);
        self.shift(advance);
        self.emit(text, start);
    }

    fn show_array(&mut self, items: &[PdfValue]) {
        if !self.in_text {
            return;
        }
        let start = self.device_position();
        let mut combined = String::new();

        for item in items {
            match item {
                PdfValue::Str(bytes) => {
                    combined.push_str(&self.decode(bytes));
                    let advance = self.advance(bytes);
                    self.shift(advance);
                }
                PdfValue::Integer(_) | PdfValue::Real(_) => {
                    let adjustment = item.as_number().unwrap_or(0.0);
                    let params = &self.state.text;
                    let tx = -adjustment / 1000.0 * params.font_size * params.horizontal_scale;
                    self.shift(tx);
                    if -adjustment > TJ_SPACE_THRESHOLD && wants_space(&combined) {
                        combined.push(' ');
                    }
                }
                _ => {}
            }
        }

        self.emit(combined, start);
    }

    fn emit(&mut self, text: String, start: (f32, f32)) {
        if text.is_empty() {
            return;
        }
        let rendering = self.text_matrix.multiply(&self.state.ctm);
        let (end_x, _) = rendering.apply(0.0, 0.0);
        let font_size = self.state.text.font_size * rendering.vertical_scale();

        let mut run = GlyphRun::new(
            text,
            self.page_number,
            self.page_height - start.1,
            start.0,
            end_x,
            font_size,
        );
        if let Some(font) = self.font() {
            run = run.with_font(font.base_font.clone());
        }
        self.sink.accept(run);
        self.emitted += 1;
    }
}

fn set_number(op: &ContentOp, target: &mut f32) {
    if let Some(value) = op.number(0) {
        *target = value;
    }
}

/// Whether a `TJ` word gap should become a space after `text`.
fn wants_space(text: &str) -> bool {
    match text.chars().last() {
        Some(c) => !c.is_whitespace() && !is_spaceless_script_char(c),
        None => false,
    }
}

/// Chinese and Japanese scripts do not separate words with spaces.
fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x3040..=0x309F   // Hiragana
        | 0x30A0..=0x30FF // Katakana
        | 0x3400..=0x4DBF // CJK Extension A
        | 0x4E00..=0x9FFF // CJK Unified Ideographs
        | 0xF900..=0xFAFF // CJK Compatibility Ideographs
        | 0x3000..=0x303F // CJK punctuation
    )
}
