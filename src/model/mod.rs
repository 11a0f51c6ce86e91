//! Data model shared by the extraction, classification and ranking stages.
//!
//! Glyph runs come in from the extraction layer, logical lines are built
//! by the merger, and headings, outlines and ranked sections are the
//! artifacts written out as JSON.

mod glyph;
mod line;
mod outline;
mod persona;

pub use glyph::GlyphRun;
pub use line::LogicalLine;
pub use outline::{DocumentOutline, HeadingLevel, HeadingLine};
pub use persona::{
    Persona, PersonaMetadata, PersonaReport, RankedSection, UNKNOWN_JOB, UNKNOWN_PERSONA,
};
