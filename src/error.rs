use thiserror::Error;

/// Errors raised while decoding keys or screening them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScreenError {
    /// A key does not have the bit length the thresholds were derived for.
    #[error("{} has {actual} bits, expected exactly {expected}", length_subject(.key))]
    InvalidLength {
        key: Option<usize>,
        expected: usize,
        actual: usize,
    },

    /// The poker test needs the sequence to split into whole chunks.
    #[error("sequence of {len} bits does not split into {chunk_bits}-bit chunks")]
    NotChunkAligned { len: usize, chunk_bits: usize },

    /// A raw bit value other than 0 or 1.
    #[error("invalid bit value {value} at index {index}")]
    InvalidBit { index: usize, value: u8 },

    /// A key line could not be decoded with the selected encoding.
    #[error("line {line}: {reason}")]
    InvalidKeyEncoding { line: usize, reason: String },
}

fn length_subject(key: &Option<usize>) -> String {
    match key {
        Some(key) => format!("key {}", key),
        None => "sequence".to_string(),
    }
}

impl ScreenError {
    /// Attach the key position to a length error raised by a single test.
    pub fn for_key(self, key: usize) -> Self {
        match self {
            ScreenError::InvalidLength {
                expected, actual, ..
            } => ScreenError::InvalidLength {
                key: Some(key),
                expected,
                actual,
            },
            other => other,
        }
    }
}
