//! Layout heuristics: line reconstruction, body size, heading levels and titles.
//!
//! Everything here works on plain [`GlyphRun`](crate::model::GlyphRun) and
//! [`LogicalLine`](crate::model::LogicalLine) values and knows nothing about
//! PDF objects.

mod body_size;
mod classifier;
mod merger;
mod title;

pub use body_size::{estimate_body_size, BODY_SIZE_RANGE, DEFAULT_BODY_SIZE};
pub use classifier::{extract_headings, HeadingClassifier, HeadingPolicy, HeadingThresholds};
pub use merger::{
    merge_runs, sort_lines, GlyphSink, LineMerger, MAX_RUN_GAP, SAME_LINE_TOLERANCE,
};
pub use title::{resolve_persona, resolve_title, UNTITLED};
