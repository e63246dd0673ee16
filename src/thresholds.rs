//! Acceptance constants for the FIPS 140 power-up statistical tests.
//!
//! Every bound here was derived for a 20,000-bit sample and means nothing for
//! any other length. The suite rejects keys of other lengths instead of
//! scoring them.

use serde::{Deserialize, Serialize};

use crate::error::ScreenError;

/// Bit length every screened key must have.
pub const KEY_BITS: usize = 20_000;

/// Poker test chunk width in bits.
pub const POKER_CHUNK_BITS: usize = 4;

/// Number of poker chunks in a key.
pub const POKER_CHUNKS: usize = KEY_BITS / POKER_CHUNK_BITS;

/// Number of distinct poker patterns (2^4).
pub const POKER_PATTERNS: usize = 1 << POKER_CHUNK_BITS;

/// Run lengths at or above this share the last histogram bucket.
pub const MAX_RUN_BUCKET: usize = 6;

/// A (min, max) range a count or statistic has to fall in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcceptanceInterval {
    pub min: f64,
    pub max: f64,
    /// Whether the bounds themselves are accepted.
    pub inclusive: bool,
}

impl AcceptanceInterval {
    pub const fn exclusive(min: f64, max: f64) -> Self {
        AcceptanceInterval {
            min,
            max,
            inclusive: false,
        }
    }

    pub const fn inclusive(min: f64, max: f64) -> Self {
        AcceptanceInterval {
            min,
            max,
            inclusive: true,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        if self.inclusive {
            self.min <= value && value <= self.max
        } else {
            self.min < value && value < self.max
        }
    }
}

/// How runs are grouped before their bucket counts meet the runs table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunsTally {
    /// One histogram over every run, whatever its bit value.
    #[default]
    Combined,
    /// Runs of zeros and runs of ones are tallied and checked separately.
    PerBitValue,
}

/// Which published threshold set to score against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThresholdProfile {
    #[default]
    #[serde(rename = "fips140-1")]
    Fips140_1,
    #[serde(rename = "fips140-2")]
    Fips140_2,
    #[serde(rename = "fips140-1-per-bit")]
    Fips140_1PerBit,
    #[serde(rename = "fips140-2-per-bit")]
    Fips140_2PerBit,
}

impl ThresholdProfile {
    pub const ALL: [ThresholdProfile; 4] = [
        ThresholdProfile::Fips140_1,
        ThresholdProfile::Fips140_2,
        ThresholdProfile::Fips140_1PerBit,
        ThresholdProfile::Fips140_2PerBit,
    ];

    pub fn thresholds(self) -> &'static Thresholds {
        match self {
            ThresholdProfile::Fips140_1 => &Thresholds::FIPS_140_1,
            ThresholdProfile::Fips140_2 => &Thresholds::FIPS_140_2,
            ThresholdProfile::Fips140_1PerBit => &Thresholds::FIPS_140_1_PER_BIT,
            ThresholdProfile::Fips140_2PerBit => &Thresholds::FIPS_140_2_PER_BIT,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ThresholdProfile::Fips140_1 => "fips140-1",
            ThresholdProfile::Fips140_2 => "fips140-2",
            ThresholdProfile::Fips140_1PerBit => "fips140-1-per-bit",
            ThresholdProfile::Fips140_2PerBit => "fips140-2-per-bit",
        }
    }
}

impl std::str::FromStr for ThresholdProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fips140-1" | "140-1" => Ok(ThresholdProfile::Fips140_1),
            "fips140-2" | "140-2" => Ok(ThresholdProfile::Fips140_2),
            "fips140-1-per-bit" | "140-1-per-bit" => Ok(ThresholdProfile::Fips140_1PerBit),
            "fips140-2-per-bit" | "140-2-per-bit" => Ok(ThresholdProfile::Fips140_2PerBit),
            other => Err(format!("unknown threshold profile '{}'", other)),
        }
    }
}

/// The complete set of bounds used by the four tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Thresholds {
    pub monobit: AcceptanceInterval,
    pub poker: AcceptanceInterval,
    /// Indexed by clamped run length minus one.
    pub runs: [AcceptanceInterval; MAX_RUN_BUCKET],
    /// A run this long or longer fails the long run test.
    pub long_run: usize,
    pub runs_tally: RunsTally,
}

impl Thresholds {
    pub const FIPS_140_1: Thresholds = Thresholds {
        monobit: AcceptanceInterval::exclusive(9654.0, 10346.0),
        poker: AcceptanceInterval::exclusive(1.03, 57.4),
        runs: [
            AcceptanceInterval::inclusive(2267.0, 2733.0),
            AcceptanceInterval::inclusive(1079.0, 1421.0),
            AcceptanceInterval::inclusive(502.0, 748.0),
            AcceptanceInterval::inclusive(223.0, 402.0),
            AcceptanceInterval::inclusive(90.0, 223.0),
            AcceptanceInterval::inclusive(90.0, 233.0),
        ],
        long_run: 34,
        runs_tally: RunsTally::Combined,
    };

    pub const FIPS_140_2: Thresholds = Thresholds {
        monobit: AcceptanceInterval::exclusive(9725.0, 10275.0),
        poker: AcceptanceInterval::exclusive(2.16, 46.17),
        runs: [
            AcceptanceInterval::inclusive(2315.0, 2685.0),
            AcceptanceInterval::inclusive(1114.0, 1386.0),
            AcceptanceInterval::inclusive(527.0, 723.0),
            AcceptanceInterval::inclusive(240.0, 384.0),
            AcceptanceInterval::inclusive(103.0, 209.0),
            AcceptanceInterval::inclusive(103.0, 209.0),
        ],
        long_run: 26,
        runs_tally: RunsTally::Combined,
    };

    pub const FIPS_140_1_PER_BIT: Thresholds = Thresholds {
        runs_tally: RunsTally::PerBitValue,
        ..Thresholds::FIPS_140_1
    };

    pub const FIPS_140_2_PER_BIT: Thresholds = Thresholds {
        runs_tally: RunsTally::PerBitValue,
        ..Thresholds::FIPS_140_2
    };

    /// Interval for a clamped run length in 1..=6.
    pub fn run_interval(&self, bucket: usize) -> Option<&AcceptanceInterval> {
        bucket.checked_sub(1).and_then(|i| self.runs.get(i))
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds::FIPS_140_1
    }
}

/// Reject sequences the thresholds were not derived for.
pub fn require_key_length(len: usize) -> Result<(), ScreenError> {
    if len != KEY_BITS {
        return Err(ScreenError::InvalidLength {
            key: None,
            expected: KEY_BITS,
            actual: len,
        });
    }
    Ok(())
}
