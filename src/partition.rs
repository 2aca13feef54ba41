//! Splits the rows of an image into one contiguous band per worker.

use std::ops::Range;

/// The band of rows a single worker renders and writes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RowRange {
    /// First row of the band.
    pub start_row: usize,
    /// Number of rows in the band; may be zero.
    pub rows: usize,
}

impl RowRange {
    /// One past the last row of the band.
    pub fn end_row(&self) -> usize {
        self.start_row + self.rows
    }

    /// The band as a range of row indices.
    pub fn as_range(&self) -> Range<usize> {
        self.start_row..self.end_row()
    }

    /// Whether the band has no rows at all.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

/// Gives each of `workers` workers `height / workers` rows, with the
/// first `height % workers` workers taking one extra.  The bands are
/// returned in rank order and tile `0..height` exactly.  Workers past
/// the last row receive empty bands.
pub fn partition(height: usize, workers: usize) -> Vec<RowRange> {
    if workers == 0 {
        return vec![];
    }
    let base = height / workers;
    let rem = height % workers;
    (0..workers)
        .map(|rank| RowRange {
            start_row: rank * base + rank.min(rem),
            rows: base + if rank < rem { 1 } else { 0 },
        })
        .collect()
}
