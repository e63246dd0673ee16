use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tracing::{debug, info, warn};

pub mod api;
pub mod bits;
pub mod error;
pub mod keyfile;
pub mod persistence;
pub mod report;
pub mod runs;
pub mod suite;
pub mod thresholds;

pub use bits::BitSequence;
pub use error::ScreenError;
pub use fips_tests::{FipsTest, TestVerdict};
pub use keyfile::{parse_keys, KeyEncoding};
pub use runs::{decompose_runs, Run, RunLengthHistogram};
pub use suite::{run_suite, KeyVerdicts, VerdictMatrix};
pub use thresholds::{AcceptanceInterval, RunsTally, ThresholdProfile, Thresholds, KEY_BITS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenRequest {
    /// Key file contents, one key per line.
    pub keys: String,
    #[serde(default)]
    pub encoding: KeyEncoding,
    #[serde(default)]
    pub profile: ThresholdProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenResponse {
    /// True when every key passed every test.
    pub valid: bool,
    pub message: String,
    pub key_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<uuid::Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix: Option<VerdictMatrix>,
}

impl ScreenResponse {
    fn rejected(message: String) -> Self {
        ScreenResponse {
            valid: false,
            message,
            key_count: 0,
            batch_id: None,
            analyzed_at: None,
            matrix: None,
        }
    }
}

/// Decode key text and screen every key.
pub fn screen_keys_text(
    input: &str,
    encoding: KeyEncoding,
    profile: ThresholdProfile,
) -> Result<VerdictMatrix, ScreenError> {
    let keys = parse_keys(input, encoding)?;
    debug!(
        "Parsed {} keys ({} bits total)",
        keys.len(),
        keys.iter().map(BitSequence::len).sum::<usize>()
    );
    run_suite(&keys, profile)
}

/// Screen a request and package the outcome for callers that want a
/// response rather than an error.
pub fn screen_request(request: &ScreenRequest) -> ScreenResponse {
    debug!(
        "Starting screening: input_length={}, encoding={:?}, profile={}",
        request.keys.len(),
        request.encoding,
        request.profile.name()
    );

    let matrix = match screen_keys_text(&request.keys, request.encoding, request.profile) {
        Ok(matrix) => matrix,
        Err(e) => {
            warn!("Failed to screen keys: {}", e);
            return ScreenResponse::rejected(e.to_string());
        }
    };

    let failed = matrix.failed_keys();
    let valid = failed.is_empty();
    let message = if matrix.is_empty() {
        "No keys provided".to_string()
    } else if valid {
        format!("All {} keys passed", matrix.len())
    } else {
        format!("{} of {} keys failed", failed.len(), matrix.len())
    };
    info!("Screening complete: valid={}, {}", valid, message);

    ScreenResponse {
        valid,
        message,
        key_count: matrix.len(),
        batch_id: Some(uuid::Uuid::new_v4()),
        analyzed_at: Some(Utc::now()),
        matrix: Some(matrix),
    }
}
