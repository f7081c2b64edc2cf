//! Line module - the one canonical slide/merge routine
//!
//! Every board move is reduced to four independent calls of [`slide_line`] on
//! lines read in "slide toward index 0" order. See [`crate::grid`] for the
//! coordinate map that produces those lines for each direction.

use crate::types::GRID_LEN;

/// One row or column, ordered so that tiles slide toward index 0
pub type Line = [u32; GRID_LEN];

/// Result of sliding a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineSlide {
    /// The line after merging and compaction
    pub line: Line,
    /// Sum of the values produced by merges
    pub score_delta: u32,
    /// True if any tile moved or changed value
    pub changed: bool,
    /// Number of merges performed (at most 2 for a 4-cell line)
    pub merges: u8,
}

/// Slide and merge a line toward index 0.
///
/// Merge pass: for each nonzero tile at `i`, look at the nearest nonzero tile
/// at `j > i` (zeros in between are skipped). If the two are equal and `i` has
/// not merged yet in this pass, `line[i]` doubles and `line[j]` empties. A tile
/// is only ever compared against that single nearest neighbour.
///
/// Compaction pass: nonzero tiles are packed toward index 0 in their existing
/// order, without any further merging.
///
/// # Examples
///
/// ```
/// use joystick_2048_core::slide_line;
///
/// let slide = slide_line([0, 2, 2, 2]);
/// assert_eq!(slide.line, [4, 2, 0, 0]);
/// assert_eq!(slide.score_delta, 4);
/// assert!(slide.changed);
/// ```
pub fn slide_line(input: Line) -> LineSlide {
    let mut line = input;
    let mut merged = [false; GRID_LEN];
    let mut score_delta = 0u32;
    let mut merges = 0u8;

    for i in 0..GRID_LEN {
        if line[i] == 0 {
            continue;
        }
        let Some(j) = (i + 1..GRID_LEN).find(|&j| line[j] != 0) else {
            continue;
        };
        if line[i] == line[j] && !merged[i] {
            line[i] *= 2;
            line[j] = 0;
            merged[i] = true;
            score_delta += line[i];
            merges += 1;
        }
    }

    // Stable compaction toward index 0.
    let mut write = 0usize;
    for read in 0..GRID_LEN {
        let value = line[read];
        if value != 0 {
            line[read] = 0;
            line[write] = value;
            write += 1;
        }
    }

    LineSlide {
        line,
        score_delta,
        changed: line != input,
        merges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_line_is_unchanged() {
        let slide = slide_line([0; 4]);
        assert_eq!(slide.line, [0; 4]);
        assert_eq!(slide.score_delta, 0);
        assert!(!slide.changed);
        assert_eq!(slide.merges, 0);
    }

    #[test]
    fn test_pair_merges_into_first_cell() {
        let slide = slide_line([2, 2, 0, 0]);
        assert_eq!(slide.line, [4, 0, 0, 0]);
        assert_eq!(slide.score_delta, 4);
        assert!(slide.changed);
        assert_eq!(slide.merges, 1);
    }

    #[test]
    fn test_trailing_tile_compacts_without_merging() {
        let slide = slide_line([0, 2, 2, 2]);
        assert_eq!(slide.line, [4, 2, 0, 0]);
        assert_eq!(slide.score_delta, 4);
    }

    #[test]
    fn test_gaps_are_skipped_when_finding_neighbour() {
        let slide = slide_line([2, 0, 0, 2]);
        assert_eq!(slide.line, [4, 0, 0, 0]);
        assert_eq!(slide.score_delta, 4);
    }

    #[test]
    fn test_nearest_neighbour_blocks_farther_match() {
        // 2 sees 4 first; the later 2 is never considered.
        let slide = slide_line([2, 4, 2, 0]);
        assert_eq!(slide.line, [2, 4, 2, 0]);
        assert!(!slide.changed);
        assert_eq!(slide.score_delta, 0);
    }

    #[test]
    fn test_no_chain_merge_in_one_pass() {
        let slide = slide_line([4, 4, 8, 0]);
        assert_eq!(slide.line, [8, 8, 0, 0]);
        assert_eq!(slide.score_delta, 8);
        assert_eq!(slide.merges, 1);
    }

    #[test]
    fn test_two_pairs_merge_independently() {
        let slide = slide_line([2, 2, 2, 2]);
        assert_eq!(slide.line, [4, 4, 0, 0]);
        assert_eq!(slide.score_delta, 8);
        assert_eq!(slide.merges, 2);

        let slide = slide_line([4, 4, 2, 2]);
        assert_eq!(slide.line, [8, 4, 0, 0]);
        assert_eq!(slide.score_delta, 12);
    }

    #[test]
    fn test_compaction_only_counts_as_change() {
        let slide = slide_line([0, 0, 0, 8]);
        assert_eq!(slide.line, [8, 0, 0, 0]);
        assert_eq!(slide.score_delta, 0);
        assert!(slide.changed);
        assert_eq!(slide.merges, 0);
    }

    #[test]
    fn test_packed_distinct_line_is_unchanged() {
        let slide = slide_line([2, 4, 8, 16]);
        assert_eq!(slide.line, [2, 4, 8, 16]);
        assert!(!slide.changed);
    }
}
