//! Decoding of key files into bit sequences.
//!
//! A key file holds one key per line. Each key may be wrapped in a single
//! pair of delimiters such as `[...]` or `"..."`, which is stripped before
//! decoding. Blank lines are ignored.

use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::bits::BitSequence;
use crate::error::ScreenError;

/// Text encoding of each key line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyEncoding {
    #[default]
    Hex,
    Base64,
}

impl KeyEncoding {
    pub fn name(self) -> &'static str {
        match self {
            KeyEncoding::Hex => "hex",
            KeyEncoding::Base64 => "base64",
        }
    }
}

impl std::str::FromStr for KeyEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(KeyEncoding::Hex),
            "base64" => Ok(KeyEncoding::Base64),
            other => Err(format!("unknown key encoding '{}'", other)),
        }
    }
}

const WRAPPERS: [(char, char); 6] = [
    ('[', ']'),
    ('(', ')'),
    ('{', '}'),
    ('<', '>'),
    ('"', '"'),
    ('\'', '\''),
];

/// Remove one matching pair of wrapper characters, if present.
pub fn strip_wrapper(line: &str) -> &str {
    let mut chars = line.chars();
    let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
        return line;
    };
    if WRAPPERS.iter().any(|&(open, close)| open == first && close == last) {
        &line[first.len_utf8()..line.len() - last.len_utf8()]
    } else {
        line
    }
}

/// Decode hex digits into bits, four per digit, most significant first.
pub fn decode_hex(text: &str) -> Result<BitSequence, String> {
    let mut bits = Vec::with_capacity(text.len() * 4);
    for (pos, c) in text.chars().enumerate() {
        let nibble = c
            .to_digit(16)
            .ok_or_else(|| format!("invalid hex digit '{}' at position {}", c, pos))?;
        for shift in (0..4).rev() {
            bits.push(((nibble >> shift) & 1) as u8);
        }
    }
    BitSequence::from_bits(bits).map_err(|e| e.to_string())
}

/// Decode standard base64 into bits, most significant first per byte.
pub fn decode_base64(text: &str) -> Result<BitSequence, String> {
    base64::engine::general_purpose::STANDARD
        .decode(text)
        .map(|bytes| BitSequence::from_bytes(&bytes))
        .map_err(|e| format!("invalid base64: {}", e))
}

/// Decode a single key line.
pub fn decode_key(line: &str, encoding: KeyEncoding) -> Result<BitSequence, String> {
    let body = strip_wrapper(line.trim()).trim();
    if body.is_empty() {
        return Err("empty key".to_string());
    }
    match encoding {
        KeyEncoding::Hex => decode_hex(body),
        KeyEncoding::Base64 => decode_base64(body),
    }
}

/// Parse a whole key file. Line numbers in errors are 1-based.
pub fn parse_keys(text: &str, encoding: KeyEncoding) -> Result<Vec<BitSequence>, ScreenError> {
    let mut keys = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let key = decode_key(line, encoding).map_err(|reason| {
            warn!("Failed to decode key on line {}: {}", idx + 1, reason);
            ScreenError::InvalidKeyEncoding {
                line: idx + 1,
                reason,
            }
        })?;
        keys.push(key);
    }
    debug!("Decoded {} keys", keys.len());
    Ok(keys)
}
