// Tests for runs.rs
mod common;

use common::{alternating_key, constant_key, lcg_bits, passing_key};
use fipskeyscreen::{decompose_runs, BitSequence, RunLengthHistogram, KEY_BITS};

/// Runs must tile 0..len in order, be maximal, and sum to the length.
fn assert_partition(bits: &BitSequence) {
    let runs = decompose_runs(bits);
    if bits.is_empty() {
        assert!(runs.is_empty());
        return;
    }

    assert_eq!(runs.first().unwrap().start, 0);
    assert_eq!(runs.last().unwrap().end, bits.len() - 1);

    for pair in runs.windows(2) {
        assert_eq!(pair[0].end + 1, pair[1].start, "runs must be contiguous");
        assert_ne!(pair[0].bit, pair[1].bit, "adjacent runs must differ");
    }

    for run in &runs {
        assert!(run.start <= run.end);
        for idx in run.start..=run.end {
            assert_eq!(bits.get(idx), Some(run.bit));
        }
    }

    let total: usize = runs.iter().map(|r| r.length()).sum();
    assert_eq!(total, bits.len());
}

#[test]
fn test_partition_on_various_sequences() {
    for len in [0, 1, 2, 3, 7, 64, 1000] {
        assert_partition(&lcg_bits(len, len as u64 + 1));
    }
    assert_partition(&passing_key());
    assert_partition(&alternating_key());
    assert_partition(&constant_key(true));
}

#[test]
fn test_constant_key_is_single_run() {
    for bit in [false, true] {
        let runs = decompose_runs(&constant_key(bit));
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].length(), KEY_BITS);
        assert_eq!(runs[0].bit, bit);
    }
}

#[test]
fn test_alternating_key_runs_of_one() {
    let runs = decompose_runs(&alternating_key());
    assert_eq!(runs.len(), KEY_BITS);
    assert!(runs.iter().all(|r| r.length() == 1));

    let histogram = RunLengthHistogram::from_runs(&runs);
    assert_eq!(histogram.count(1), KEY_BITS);
    assert_eq!(histogram.present().count(), 1);
}

#[test]
fn test_passing_key_histogram() {
    let runs = decompose_runs(&passing_key());
    assert_eq!(runs.len(), 10_000);

    for bit in [false, true] {
        let histogram = RunLengthHistogram::for_bit(&runs, bit);
        assert_eq!(histogram.count(1), 2500);
        assert_eq!(histogram.count(2), 1250);
        assert_eq!(histogram.count(3), 625);
        assert_eq!(histogram.count(4), 312);
        assert_eq!(histogram.count(5), 156);
        assert_eq!(histogram.count(6), 157);
        assert_eq!(histogram.total(), 5000);
    }
}

#[test]
fn test_trailing_run_is_closed() {
    let bits = BitSequence::from_bits(vec![0, 1, 1, 1]).unwrap();
    let runs = decompose_runs(&bits);
    assert_eq!(runs.len(), 2);
    assert_eq!((runs[1].start, runs[1].end), (1, 3));
}
