use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::bits::BitSequence;
use crate::error::ScreenError;
use crate::fips_tests::{all_tests, FipsTest, KeyAnalysis, TestVerdict};
use crate::thresholds::{require_key_length, ThresholdProfile};

/// Verdicts for one key, one entry per test in column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyVerdicts {
    /// Position of the key in the screened batch.
    pub key: usize,
    pub verdicts: Vec<TestVerdict>,
}

impl KeyVerdicts {
    pub fn get(&self, test: FipsTest) -> Option<&TestVerdict> {
        self.verdicts.iter().find(|v| v.test == test)
    }

    pub fn passed(&self, test: FipsTest) -> Option<bool> {
        self.get(test).map(|v| v.passed)
    }

    pub fn all_passed(&self) -> bool {
        self.verdicts.iter().all(|v| v.passed)
    }
}

/// Per-key, per-test verdicts for a whole batch. Rows keep input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerdictMatrix {
    pub profile: ThresholdProfile,
    pub rows: Vec<KeyVerdicts>,
}

impl VerdictMatrix {
    pub fn verdict(&self, key: usize, test: FipsTest) -> Option<bool> {
        self.rows.get(key).and_then(|row| row.passed(test))
    }

    /// Every key's verdict for one test, in key order.
    pub fn column(&self, test: FipsTest) -> Vec<bool> {
        self.rows
            .iter()
            .filter_map(|row| row.passed(test))
            .collect()
    }

    pub fn all_passed(&self) -> bool {
        self.rows.iter().all(KeyVerdicts::all_passed)
    }

    pub fn failed_keys(&self) -> Vec<usize> {
        self.rows
            .iter()
            .filter(|row| !row.all_passed())
            .map(|row| row.key)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Run the four tests against one key that has already been length-checked.
fn screen_checked(index: usize, bits: &BitSequence, profile: ThresholdProfile) -> KeyVerdicts {
    let thresholds = profile.thresholds();
    // One decomposition feeds both run-based tests.
    let analysis = KeyAnalysis::new(bits);
    debug!("Key {}: {} runs", index, analysis.runs.len());

    let verdicts = all_tests()
        .iter()
        .map(|definition| (definition.execute)(&analysis, thresholds))
        .collect();

    KeyVerdicts {
        key: index,
        verdicts,
    }
}

/// Screen a single key.
pub fn screen_key(
    index: usize,
    bits: &BitSequence,
    profile: ThresholdProfile,
) -> Result<KeyVerdicts, ScreenError> {
    require_key_length(bits.len()).map_err(|e| e.for_key(index))?;
    Ok(screen_checked(index, bits, profile))
}

/// Screen every key and assemble the verdict matrix.
///
/// All keys are length-checked before any scoring, so a malformed key
/// rejects the whole batch instead of yielding a partial matrix. An empty
/// batch produces an empty matrix.
pub fn run_suite(
    keys: &[BitSequence],
    profile: ThresholdProfile,
) -> Result<VerdictMatrix, ScreenError> {
    for (index, key) in keys.iter().enumerate() {
        require_key_length(key.len()).map_err(|e| e.for_key(index))?;
    }

    info!(
        "Screening {} keys against {}",
        keys.len(),
        profile.name()
    );

    let rows: Vec<KeyVerdicts> = keys
        .iter()
        .enumerate()
        .map(|(index, key)| screen_checked(index, key, profile))
        .collect();

    let matrix = VerdictMatrix { profile, rows };
    info!(
        "Screening complete: {} keys, {} failing",
        matrix.len(),
        matrix.failed_keys().len()
    );
    Ok(matrix)
}
