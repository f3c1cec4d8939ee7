//! Row partitioning for parallel convolution.

use std::ops::Range;

/// Half-open interval of image rows `[start, end)` owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn rows(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Split `[0, height)` into contiguous ranges, one per worker.
///
/// The worker count is clamped to `1..=height`, so every range holds at
/// least one row. The first `height % workers` ranges get one extra row.
/// The result depends only on the arguments, never on runtime scheduling.
pub fn partition_rows(height: usize, workers: usize) -> Vec<RowRange> {
    if height == 0 {
        return Vec::new();
    }

    let workers = workers.clamp(1, height);
    let base = height / workers;
    let remainder = height % workers;

    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;
    for i in 0..workers {
        let rows = if i < remainder { base + 1 } else { base };
        ranges.push(RowRange {
            start,
            end: start + rows,
        });
        start += rows;
    }

    ranges
}
