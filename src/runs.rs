use serde::{Deserialize, Serialize};

use crate::bits::BitSequence;
use crate::thresholds::MAX_RUN_BUCKET;

/// A maximal stretch of identical bits. `end` is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub start: usize,
    pub end: usize,
    pub bit: bool,
}

impl Run {
    pub fn length(&self) -> usize {
        self.end - self.start + 1
    }

    /// Length collapsed into the 1..=6 histogram buckets.
    pub fn bucket(&self) -> usize {
        self.length().min(MAX_RUN_BUCKET)
    }
}

/// Split a sequence into its maximal runs, ordered by start index.
///
/// The runs cover every index exactly once and no two neighbours share a
/// bit value. An empty sequence has no runs.
pub fn decompose_runs(bits: &BitSequence) -> Vec<Run> {
    let slice = bits.as_slice();
    let Some(&first) = slice.first() else {
        return Vec::new();
    };

    let mut runs = Vec::new();
    let mut start = 0;
    let mut current = first;

    for (idx, &bit) in slice.iter().enumerate().skip(1) {
        if bit != current {
            runs.push(Run {
                start,
                end: idx - 1,
                bit: current == 1,
            });
            start = idx;
            current = bit;
        }
    }

    // Close whatever run reaches the final index.
    runs.push(Run {
        start,
        end: slice.len() - 1,
        bit: current == 1,
    });

    runs
}

/// Count of runs per clamped length; bucket 6 holds every run of 6 or more.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunLengthHistogram {
    counts: [usize; MAX_RUN_BUCKET],
}

impl RunLengthHistogram {
    /// Tally every run regardless of its bit value.
    pub fn from_runs(runs: &[Run]) -> Self {
        Self::tally(runs.iter())
    }

    /// Tally only the runs made of `bit`.
    pub fn for_bit(runs: &[Run], bit: bool) -> Self {
        Self::tally(runs.iter().filter(|run| run.bit == bit))
    }

    fn tally<'a>(runs: impl Iterator<Item = &'a Run>) -> Self {
        let mut histogram = RunLengthHistogram::default();
        for run in runs {
            histogram.counts[run.bucket() - 1] += 1;
        }
        histogram
    }

    /// Runs counted in a bucket; 0 for buckets outside 1..=6.
    pub fn count(&self, bucket: usize) -> usize {
        bucket
            .checked_sub(1)
            .and_then(|i| self.counts.get(i))
            .copied()
            .unwrap_or(0)
    }

    /// Non-empty buckets as (bucket, count), shortest first.
    pub fn present(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(i, &count)| (i + 1, count))
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}
