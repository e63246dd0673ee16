#![allow(dead_code)]

use fipskeyscreen::{BitSequence, KEY_BITS};
use std::iter::repeat;

/// Run lengths for one bit value: 5000 runs covering 10,000 bits, with
/// bucket counts sitting in the middle of the FIPS 140-1 and 140-2 tables.
fn run_lengths() -> Vec<usize> {
    let mut lengths = Vec::with_capacity(5000);
    for (len, count) in [(1, 2500), (2, 1250), (3, 625), (4, 312), (5, 156), (6, 2), (7, 155)] {
        lengths.extend(repeat(len).take(count));
    }
    lengths
}

/// A 20,000-bit key that passes all four tests under both per-bit-value
/// profiles.
///
/// Runs of zeros and ones alternate; each value's run lengths are a fixed
/// permutation of `run_lengths`, which keeps the poker statistic near 16.8.
/// Tallied together its runs put 5000 in bucket 1, so the combined runs test
/// fails it.
pub fn passing_key() -> BitSequence {
    let lengths = run_lengths();
    let n = lengths.len();
    let zeros: Vec<usize> = (0..n).map(|i| lengths[(i * 2053) % n]).collect();
    let ones: Vec<usize> = (0..n).map(|i| lengths[(i * 3001 + 17) % n]).collect();

    zeros
        .iter()
        .zip(&ones)
        .flat_map(|(&z, &o)| repeat(false).take(z).chain(repeat(true).take(o)))
        .collect()
}

pub fn constant_key(bit: bool) -> BitSequence {
    repeat(bit).take(KEY_BITS).collect()
}

/// 0, 1, 0, 1, ...
pub fn alternating_key() -> BitSequence {
    (0..KEY_BITS).map(|i| i % 2 == 1).collect()
}

/// A key whose first `ones` bits are set and the rest clear.
pub fn key_with_ones(ones: usize) -> BitSequence {
    (0..KEY_BITS).map(|i| i < ones).collect()
}

/// Alternating bits ending in a single run of `run_len` identical bits.
pub fn key_ending_in_run(run_len: usize) -> BitSequence {
    let mut bits: Vec<bool> = (0..KEY_BITS - run_len).map(|i| i % 2 == 1).collect();
    let last = bits.last().copied().unwrap_or(false);
    bits.extend(repeat(!last).take(run_len));
    bits.into_iter().collect()
}

/// Concatenated runs of the given lengths, starting with zeros and
/// alternating, so every length becomes exactly one maximal run.
pub fn key_from_run_lengths(lengths: &[usize]) -> BitSequence {
    lengths
        .iter()
        .enumerate()
        .flat_map(|(i, &len)| repeat(i % 2 == 1).take(len))
        .collect()
}

/// A 20,000-bit key whose combined run histogram holds `singles` runs of
/// length 1, 1250/625/312/156 runs of lengths 2 to 5 and 157 long runs
/// soaking up the remaining bits.
pub fn key_with_single_runs(singles: usize) -> BitSequence {
    let mut lengths = vec![1; singles];
    for (len, count) in [(2, 1250), (3, 625), (4, 312), (5, 156)] {
        lengths.extend(repeat(len).take(count));
    }
    let long_runs = 157;
    let remaining = KEY_BITS - lengths.iter().sum::<usize>();
    let (base, extra) = (remaining / long_runs, remaining % long_runs);
    lengths.extend(repeat(base + 1).take(extra));
    lengths.extend(repeat(base).take(long_runs - extra));
    key_from_run_lengths(&lengths)
}

/// A key made of `counts[p]` copies of each 4-bit pattern `p`, in pattern
/// order. The counts must add up to 5000.
pub fn key_from_poker_counts(counts: &[usize; 16]) -> BitSequence {
    counts
        .iter()
        .enumerate()
        .flat_map(|(pattern, &count)| repeat(pattern).take(count))
        .flat_map(|pattern| (0..4).rev().map(move |shift| (pattern >> shift) & 1 == 1))
        .collect()
}

/// Deterministic pseudo-random bits (64-bit LCG, top bit of each step).
pub fn lcg_bits(len: usize, seed: u64) -> BitSequence {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            state >> 63 == 1
        })
        .collect()
}

/// Upper-case hex, four bits per digit, most significant first.
pub fn to_hex(bits: &BitSequence) -> String {
    bits.as_slice()
        .chunks(4)
        .map(|nibble| {
            let value = nibble.iter().fold(0u32, |acc, &b| (acc << 1) | b as u32);
            char::from_digit(value, 16)
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or('0')
        })
        .collect()
}
