//! Keyword scoring and cross-document ranking of headings.

use std::cmp::Reverse;

use crate::model::{HeadingLine, RankedSection};

use super::keywords::KeywordSet;

/// Number of keywords occurring as substrings of the lowercased text.
///
/// Each keyword counts at most once, however often it occurs.
pub fn score_text(text: &str, keywords: &KeywordSet) -> u32 {
    let lowered = text.to_lowercase();
    keywords.iter().filter(|k| lowered.contains(k)).count() as u32
}

/// Sort sections by score, highest first.
///
/// The sort is stable: equal scores keep their relative order.
pub fn sort_by_relevance(sections: &mut [RankedSection]) {
    sections.sort_by_key(|s| Reverse(s.importance_rank));
}

/// Scores headings of one document; sections with score 0 are dropped.
/// The result is sorted by relevance.
pub fn rank_headings(
    document: &str,
    headings: &[HeadingLine],
    keywords: &KeywordSet,
) -> Vec<RankedSection> {
    let mut sections: Vec<RankedSection> = headings
        .iter()
        .filter_map(|heading| {
            let score = score_text(&heading.text, keywords);
            (score > 0).then(|| RankedSection::new(document, heading.page, &heading.text, score))
        })
        .collect();
    sort_by_relevance(&mut sections);
    sections
}

/// Collects ranked sections across the documents of one group.
///
/// Each document's sections are ranked on their own and appended in the
/// order documents are added; there is no re-sort across documents.
#[derive(Debug, Clone)]
pub struct SectionRanker {
    keywords: KeywordSet,
    sections: Vec<RankedSection>,
}

impl SectionRanker {
    /// Ranker for a task description.
    pub fn for_task(job: &str) -> Self {
        Self::new(KeywordSet::from_task(job))
    }

    /// Ranker for a keyword set.
    pub fn new(keywords: KeywordSet) -> Self {
        Self {
            keywords,
            sections: Vec::new(),
        }
    }

    /// The keywords being matched.
    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    /// Score one document's headings and append the matches.
    ///
    /// Returns the number of sections added.
    pub fn add_document(&mut self, document: &str, headings: &[HeadingLine]) -> usize {
        let ranked = rank_headings(document, headings, &self.keywords);
        let added = ranked.len();
        self.sections.extend(ranked);
        added
    }

    /// Append sections that were ranked elsewhere, in order.
    pub fn extend(&mut self, sections: impl IntoIterator<Item = RankedSection>) {
        self.sections.extend(sections);
    }

    /// Sections collected so far, in append order.
    pub fn sections(&self) -> &[RankedSection] {
        &self.sections
    }

    /// All sections: documents in the order added, each ranked by relevance.
    pub fn finish(self) -> Vec<RankedSection> {
        self.sections
    }
}
