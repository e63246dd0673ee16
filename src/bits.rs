use serde::{Deserialize, Serialize};

use crate::error::ScreenError;

/// An immutable, ordered sequence of bits stored one bit per byte (0 or 1).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitSequence {
    bits: Vec<u8>,
}

impl BitSequence {
    /// Build a sequence from raw 0/1 values, rejecting anything else.
    pub fn from_bits(bits: Vec<u8>) -> Result<Self, ScreenError> {
        if let Some((index, &value)) = bits.iter().enumerate().find(|(_, &b)| b > 1) {
            return Err(ScreenError::InvalidBit { index, value });
        }
        Ok(BitSequence { bits })
    }

    /// Unpack bytes into bits, most significant bit first.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut bits = Vec::with_capacity(bytes.len() * 8);
        for &byte in bytes {
            for shift in (0..8).rev() {
                bits.push((byte >> shift) & 1);
            }
        }
        BitSequence { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bits
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).map(|&b| b == 1)
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b == 1).count()
    }

    /// Consecutive non-overlapping chunks in sequence order. The last chunk
    /// is shorter when the length is not a multiple of `size`.
    pub fn chunks(&self, size: usize) -> std::slice::Chunks<'_, u8> {
        self.bits.chunks(size)
    }
}

impl FromIterator<bool> for BitSequence {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        BitSequence {
            bits: iter.into_iter().map(u8::from).collect(),
        }
    }
}

impl AsRef<[u8]> for BitSequence {
    fn as_ref(&self) -> &[u8] {
        &self.bits
    }
}
