//! Persona relevance: task keywords and heading ranking.

mod keywords;
mod ranker;

pub use keywords::{KeywordExtractor, KeywordSet};
pub use ranker::{rank_headings, score_text, sort_by_relevance, SectionRanker};
