//! Folding glyph runs into logical lines.
//!
//! Runs arrive in the extraction layer's emission order. Each run is
//! compared against the most recent line only: if it sits on the same
//! page, on the same baseline (within [`SAME_LINE_TOLERANCE`]) and starts
//! less than [`MAX_RUN_GAP`] after the line's right edge, it continues
//! that line. Otherwise the open line is closed and a new one started.


use crate::model::{GlyphRun, LogicalLine};

/// Maximum |ΔY| (points) for two runs to share a line.
pub const SAME_LINE_TOLERANCE: f32 = 1.0;

/// Maximum horizontal gap (points) between a line's right edge and the
/// next run's left edge for the run to continue the line.
pub const MAX_RUN_GAP: f32 = 5.0;

/// Receiver of glyph runs pushed by an extraction layer.
pub trait GlyphSink {
    /// Accept one run.
    fn accept(&mut self, run: GlyphRun);
}

impl GlyphSink for Vec<GlyphRun> {
    fn accept(&mut self, run: GlyphRun) {
        self.push(run);
    }
}

/// Accumulates runs into lines: finished lines plus one open line.
#[derive(Debug, Default)]
pub struct LineMerger {
    finished: Vec<LogicalLine>,
    open: Option<LogicalLine>,
}

impl LineMerger {
    /// Create an empty merger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one run.
    pub fn push(&mut self, run: &GlyphRun) {
        // Runs with no text carry no glyph positions.
        if run.text.is_empty() {
            return;
        }

        match self.open.as_mut() {
            Some(line) if continues(line, run) => line.absorb(run),
            _ => self.start_line(run),
        }
    }

    /// Number of lines produced so far, including the open one.
    pub fn len(&self) -> usize {
        self.finished.len() + usize::from(self.open.is_some())
    }

    /// Whether no line has been produced.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Close the open line and return all lines sorted by (page, Y).
    ///
    /// The sort is stable, so lines sharing a page and Y keep emission order.
    pub fn finish(mut self) -> Vec<LogicalLine> {
        self.close_open();
        let mut lines = self.finished;
        sort_lines(&mut lines);
        lines
    }

    fn start_line(&mut self, run: &GlyphRun) {
        self.close_open();
        self.open = Some(LogicalLine::start(run));
    }

    fn close_open(&mut self) {
        if let Some(line) = self.open.take() {
            self.finished.push(line);
        }
    }
}

impl GlyphSink for LineMerger {
    fn accept(&mut self, run: GlyphRun) {
        self.push(&run);
    }
}

/// Merge a sequence of runs into sorted logical lines.
pub fn merge_runs<'a, I>(runs: I) -> Vec<LogicalLine>
where
    I: IntoIterator<Item = &'a GlyphRun>,
{
    let mut merger = LineMerger::new();
    for run in runs {
        merger.push(run);
    }
    merger.finish()
}

/// Stable sort by page ascending, then Y ascending.
pub fn sort_lines(lines: &mut [LogicalLine]) {
    lines.sort_by(|a, b| {
        a.page
            .cmp(&b.page)
            .then_with(|| a.y.total_cmp(&b.y))
    });
}

fn continues(line: &LogicalLine, run: &GlyphRun) -> bool {
    line.page == run.page
        && (line.y - run.y).abs() < SAME_LINE_TOLERANCE
        && run.left_x - line.max_x < MAX_RUN_GAP
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, page: u32, y: f32, left: f32, right: f32) -> GlyphRun {
        GlyphRun::new(text, page, y, left, right, 10.0)
    }

    #[test]
    fn test_adjacent_runs_merge() {
        let lines = merge_runs(&[
            run("Hello", 1, 100.0, 50.0, 80.0),
            run(" World", 1, 100.4, 82.0, 120.0),
        ]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Hello World");
        assert_eq!(lines[0].max_x, 120.0);
    }

    #[test]
    fn test_text_appended_without_separator() {
        let lines = merge_runs(&[
            run("Intro", 1, 100.0, 50.0, 80.0),
            run("duction", 1, 100.0, 80.5, 110.0),
        ]);
        assert_eq!(lines[0].text, "Introduction");
    }

    #[test]
    fn test_wide_gap_splits() {
        let lines = merge_runs(&[
            run("Left", 1, 100.0, 50.0, 80.0),
            run("Right", 1, 100.0, 85.0, 120.0),
        ]);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_gap_just_below_threshold_merges() {
        let lines = merge_runs(&[
            run("a", 1, 100.0, 50.0, 80.0),
            run("b", 1, 100.0, 84.9, 90.0),
        ]);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_vertical_offset_splits() {
        let lines = merge_runs(&[
            run("a", 1, 100.0, 50.0, 80.0),
            run("b", 1, 101.0, 80.0, 90.0),
        ]);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_page_change_splits() {
        let lines = merge_runs(&[
            run("end", 1, 100.0, 50.0, 80.0),
            run("start", 2, 100.0, 80.0, 90.0),
        ]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].page, 1);
        assert_eq!(lines[1].page, 2);
    }

    #[test]
    fn test_backwards_run_on_same_baseline_merges() {
        // A negative gap (overlap or restart to the left) still continues.
        let lines = merge_runs(&[
            run("abc", 1, 100.0, 50.0, 80.0),
            run("def", 1, 100.0, 10.0, 40.0),
        ]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].max_x, 40.0);
    }

    #[test]
    fn test_only_last_line_is_considered() {
        let lines = merge_runs(&[
            run("first", 1, 100.0, 50.0, 80.0),
            run("second", 1, 200.0, 50.0, 80.0),
            run("tail", 1, 100.0, 81.0, 90.0),
        ]);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_whitespace_run_still_moves_right_edge() {
        let lines = merge_runs(&[
            run("Key", 1, 100.0, 50.0, 70.0),
            run("   ", 1, 100.0, 71.0, 90.0),
            run("Value", 1, 100.0, 93.0, 120.0),
        ]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Key   Value");
    }

    #[test]
    fn test_empty_run_is_skipped() {
        let mut merger = LineMerger::new();
        merger.push(&run("", 1, 100.0, 50.0, 80.0));
        assert!(merger.is_empty());
    }

    #[test]
    fn test_lines_sorted_by_page_then_y() {
        let lines = merge_runs(&[
            run("p2 top", 2, 50.0, 0.0, 10.0),
            run("p1 bottom", 1, 700.0, 0.0, 10.0),
            run("p1 top", 1, 40.0, 0.0, 10.0),
        ]);
        let texts: Vec<_> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["p1 top", "p1 bottom", "p2 top"]);
    }

    #[test]
    fn test_sort_with_nan_y_is_total() {
        let mut lines = merge_runs(&[
            run("nan", 1, f32::NAN, 0.0, 10.0),
            run("low", 1, 300.0, 0.0, 10.0),
            run("high", 1, 20.0, 0.0, 10.0),
            run("next page", 2, 10.0, 0.0, 10.0),
        ]);
        sort_lines(&mut lines);
        let texts: Vec<_> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["high", "low", "nan", "next page"]);
    }

    #[test]
    fn test_sink_accepts_runs() {
        let mut merger = LineMerger::new();
        merger.accept(run("x", 1, 10.0, 0.0, 5.0));
        merger.accept(run("y", 1, 10.0, 5.0, 9.0));
        assert_eq!(merger.len(), 1);
        assert_eq!(merger.finish()[0].text, "xy");
    }
}
