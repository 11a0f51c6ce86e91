//! Heading classification by relative font size and boldness.

use crate::model::{HeadingLevel, HeadingLine, LogicalLine};

use super::body_size::estimate_body_size;

const H1_RATIO: f32 = 1.6;
const H2_RATIO: f32 = 1.3;
const H3_RATIO: f32 = 1.1;

/// Extra factor non-bold text must exceed under [`HeadingPolicy::BoldAware`].
const NON_BOLD_FACTOR: f64 = 1.2;

/// Size cut-offs derived from the body size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingThresholds {
    pub h1: f32,
    pub h2: f32,
    pub h3: f32,
}

impl HeadingThresholds {
    /// Thresholds for a given body size.
    pub fn from_body_size(body_size: f32) -> Self {
        Self {
            h1: body_size * H1_RATIO,
            h2: body_size * H2_RATIO,
            h3: body_size * H3_RATIO,
        }
    }
}

/// How lines are mapped to heading levels.
///
/// The outline and persona pipelines use different policies; they are not
/// interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingPolicy {
    /// Bold lines use the plain cut-offs. Non-bold lines must exceed the
    /// H1/H2 cut-offs by a further 20% and can never be H3.
    #[default]
    BoldAware,
    /// Boldness is ignored; plain cut-offs for all three levels.
    SizeOnly,
}

impl HeadingPolicy {
    /// Level of a line, or `None` if it is not a heading.
    pub fn level(&self, line: &LogicalLine, t: &HeadingThresholds) -> Option<HeadingLevel> {
        let size = line.font_size;
        match self {
            HeadingPolicy::BoldAware if !line.is_bold => {
                let size = f64::from(size);
                if size > f64::from(t.h1) * NON_BOLD_FACTOR {
                    Some(HeadingLevel::H1)
                } else if size > f64::from(t.h2) * NON_BOLD_FACTOR {
                    Some(HeadingLevel::H2)
                } else {
                    None
                }
            }
            HeadingPolicy::BoldAware | HeadingPolicy::SizeOnly => {
                if size >= t.h1 {
                    Some(HeadingLevel::H1)
                } else if size >= t.h2 {
                    Some(HeadingLevel::H2)
                } else if size >= t.h3 {
                    Some(HeadingLevel::H3)
                } else {
                    None
                }
            }
        }
    }
}

/// Classifies sorted lines into headings.
#[derive(Debug, Clone, Copy)]
pub struct HeadingClassifier {
    policy: HeadingPolicy,
    thresholds: HeadingThresholds,
}

impl HeadingClassifier {
    /// Classifier with explicit thresholds.
    pub fn new(policy: HeadingPolicy, thresholds: HeadingThresholds) -> Self {
        Self { policy, thresholds }
    }

    /// Classifier whose thresholds come from the lines' body size.
    pub fn for_lines(policy: HeadingPolicy, lines: &[LogicalLine]) -> Self {
        let body_size = estimate_body_size(lines);
        let thresholds = HeadingThresholds::from_body_size(body_size);
        log::debug!(
            "Body size {:.2}pt, cut-offs H1={:.2} H2={:.2} H3={:.2} ({:?})",
            body_size,
            thresholds.h1,
            thresholds.h2,
            thresholds.h3,
            policy
        );
        Self::new(policy, thresholds)
    }

    /// The thresholds in use.
    pub fn thresholds(&self) -> HeadingThresholds {
        self.thresholds
    }

    /// Level of a single line.
    pub fn classify(&self, line: &LogicalLine) -> Option<HeadingLevel> {
        self.policy.level(line, &self.thresholds)
    }

    /// Headings in line order.
    pub fn headings(&self, lines: &[LogicalLine]) -> Vec<HeadingLine> {
        lines
            .iter()
            .filter_map(|line| {
                self.classify(line)
                    .map(|level| HeadingLine::new(level, line.text.clone(), line.page))
            })
            .collect()
    }
}

/// Classify lines using thresholds derived from their own body size.
pub fn extract_headings(lines: &[LogicalLine], policy: HeadingPolicy) -> Vec<HeadingLine> {
    HeadingClassifier::for_lines(policy, lines).headings(lines)
}
