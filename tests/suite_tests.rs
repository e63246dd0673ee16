// Tests for suite.rs
mod common;

use common::{alternating_key, constant_key, key_ending_in_run, key_with_ones, passing_key};
use fipskeyscreen::suite::screen_key;
use fipskeyscreen::{run_suite, BitSequence, FipsTest, ScreenError, ThresholdProfile};

fn batch() -> Vec<BitSequence> {
    vec![
        passing_key(),
        constant_key(false),
        alternating_key(),
        key_with_ones(9654),
        key_ending_in_run(40),
    ]
}

#[test]
fn test_matrix_rows_follow_key_order() {
    let matrix = run_suite(&batch(), ThresholdProfile::Fips140_1).unwrap();
    assert_eq!(matrix.len(), 5);
    for (i, row) in matrix.rows.iter().enumerate() {
        assert_eq!(row.key, i);
        let tests: Vec<FipsTest> = row.verdicts.iter().map(|v| v.test).collect();
        assert_eq!(tests, FipsTest::ALL.to_vec());
    }
}

#[test]
fn test_matrix_verdicts() {
    let matrix = run_suite(&batch(), ThresholdProfile::Fips140_1).unwrap();

    // Combined runs tally: the per-bit-balanced key fails only the runs test
    assert_eq!(matrix.verdict(0, FipsTest::Runs), Some(false));
    assert_eq!(matrix.verdict(0, FipsTest::Monobit), Some(true));
    assert_eq!(matrix.verdict(0, FipsTest::Poker), Some(true));
    assert_eq!(matrix.verdict(0, FipsTest::LongRun), Some(true));

    assert_eq!(matrix.verdict(1, FipsTest::Monobit), Some(false));
    assert_eq!(matrix.verdict(1, FipsTest::Runs), Some(false));
    assert_eq!(matrix.verdict(1, FipsTest::LongRun), Some(false));

    assert_eq!(matrix.verdict(2, FipsTest::Monobit), Some(true));
    assert_eq!(matrix.verdict(2, FipsTest::Runs), Some(false));
    assert_eq!(matrix.verdict(2, FipsTest::LongRun), Some(true));

    assert_eq!(matrix.verdict(3, FipsTest::Monobit), Some(false));
    assert_eq!(matrix.verdict(4, FipsTest::LongRun), Some(false));

    assert_eq!(matrix.verdict(5, FipsTest::Monobit), None);
    assert_eq!(matrix.failed_keys(), vec![0, 1, 2, 3, 4]);
    assert!(!matrix.all_passed());
}

#[test]
fn test_per_bit_profile_verdicts() {
    let matrix = run_suite(&batch(), ThresholdProfile::Fips140_1PerBit).unwrap();
    assert!(matrix.rows[0].all_passed());
    assert_eq!(matrix.profile, ThresholdProfile::Fips140_1PerBit);
    assert_eq!(matrix.failed_keys(), vec![1, 2, 3, 4]);
    assert_eq!(matrix.verdict(2, FipsTest::Poker), Some(false));
}

#[test]
fn test_column_matches_rows() {
    let matrix = run_suite(&batch(), ThresholdProfile::Fips140_1).unwrap();
    assert_eq!(
        matrix.column(FipsTest::LongRun),
        vec![true, false, true, false, false]
    );
}

#[test]
fn test_suite_is_idempotent() {
    let keys = batch();
    let first = run_suite(&keys, ThresholdProfile::Fips140_1).unwrap();
    let second = run_suite(&keys, ThresholdProfile::Fips140_1).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_empty_batch_is_valid() {
    let matrix = run_suite(&[], ThresholdProfile::Fips140_2).unwrap();
    assert!(matrix.is_empty());
    assert_eq!(matrix.profile, ThresholdProfile::Fips140_2);
}

#[test]
fn test_malformed_key_rejects_batch() {
    let mut keys = batch();
    keys.insert(2, BitSequence::from_bytes(&[0xA5; 2499]));
    let err = run_suite(&keys, ThresholdProfile::Fips140_1).unwrap_err();
    assert_eq!(
        err,
        ScreenError::InvalidLength {
            key: Some(2),
            expected: 20_000,
            actual: 19_992
        }
    );
    assert!(err.to_string().contains("key 2"));
}

#[test]
fn test_profile_changes_verdicts() {
    let keys = vec![key_with_ones(9700)];
    let lenient = run_suite(&keys, ThresholdProfile::Fips140_1).unwrap();
    let strict = run_suite(&keys, ThresholdProfile::Fips140_2).unwrap();
    assert_eq!(lenient.verdict(0, FipsTest::Monobit), Some(true));
    assert_eq!(strict.verdict(0, FipsTest::Monobit), Some(false));
}

#[test]
fn test_screen_key_matches_suite_row() {
    let key = passing_key();
    let row = screen_key(7, &key, ThresholdProfile::Fips140_1).unwrap();
    assert_eq!(row.key, 7);
    let matrix = run_suite(&[key], ThresholdProfile::Fips140_1).unwrap();
    assert_eq!(row.verdicts, matrix.rows[0].verdicts);
}
