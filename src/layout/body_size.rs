//! Body font size estimation.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use crate::model::LogicalLine;

/// Font sizes considered plausible for body text, in points.
pub const BODY_SIZE_RANGE: RangeInclusive<f32> = 8.0..=14.0;

/// Body size assumed when no line falls inside [`BODY_SIZE_RANGE`].
pub const DEFAULT_BODY_SIZE: f32 = 10.0;

/// Most frequent font size among lines inside [`BODY_SIZE_RANGE`].
///
/// Sizes are compared exactly. When several sizes are equally frequent the
/// smallest one wins.
pub fn estimate_body_size(lines: &[LogicalLine]) -> f32 {
    mode_in_range(lines.iter().map(|l| l.font_size)).unwrap_or(DEFAULT_BODY_SIZE)
}

fn mode_in_range(sizes: impl Iterator<Item = f32>) -> Option<f32> {
    // Bit patterns of non-negative floats order the same way as the values.
    let mut histogram: BTreeMap<u32, usize> = BTreeMap::new();
    for size in sizes.filter(|s| BODY_SIZE_RANGE.contains(s)) {
        *histogram.entry(size.to_bits()).or_insert(0) += 1;
    }

    let mut best: Option<(u32, usize)> = None;
    for (bits, count) in histogram {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((bits, count));
        }
    }
    best.map(|(bits, _)| f32::from_bits(bits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GlyphRun;

    fn lines(sizes: &[f32]) -> Vec<LogicalLine> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| {
                LogicalLine::start(&GlyphRun::new("t", 1, i as f32 * 20.0, 0.0, 10.0, size))
            })
            .collect()
    }

    #[test]
    fn test_mode_of_body_range() {
        assert_eq!(estimate_body_size(&lines(&[10.0, 10.0, 10.0, 12.0, 12.0, 20.0])), 10.0);
    }

    #[test]
    fn test_out_of_range_sizes_ignored() {
        // 20pt is the most common size but outside the body range.
        assert_eq!(estimate_body_size(&lines(&[20.0, 20.0, 20.0, 11.0])), 11.0);
    }

    #[test]
    fn test_range_is_closed() {
        assert_eq!(estimate_body_size(&lines(&[8.0, 8.0, 30.0])), 8.0);
        assert_eq!(estimate_body_size(&lines(&[14.0, 7.9, 7.9])), 14.0);
    }

    #[test]
    fn test_default_when_nothing_in_range() {
        assert_eq!(estimate_body_size(&lines(&[24.0, 6.0])), DEFAULT_BODY_SIZE);
        assert_eq!(estimate_body_size(&[]), DEFAULT_BODY_SIZE);
    }

    #[test]
    fn test_tie_resolves_to_smallest() {
        assert_eq!(estimate_body_size(&lines(&[12.0, 9.0, 12.0, 9.0])), 9.0);
    }

    #[test]
    fn test_sizes_compared_exactly() {
        assert_eq!(estimate_body_size(&lines(&[10.0, 10.01, 10.01])), 10.01);
    }
}
