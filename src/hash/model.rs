use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{HASH_BYTE_LEN, normalize, with_prefix};
use crate::error::HashError;

/// A 32-byte hash in canonical form: 64 lowercase hex characters, no prefix.
/// Only built through `normalize`, so the invariant always holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexHash {
    hex: String,
    bytes: [u8; HASH_BYTE_LEN],
}

impl HexHash {
    pub(super) fn from_parts(hex: String, bytes: [u8; HASH_BYTE_LEN]) -> Self {
        Self { hex, bytes }
    }

    /// Canonical unprefixed form.
    pub fn as_str(&self) -> &str {
        &self.hex
    }

    /// Canonical form with a leading "0x".
    pub fn to_prefixed(&self) -> String {
        with_prefix(&self.hex)
    }

    /// Byte at `index` (0 = characters [0:2] of the canonical string).
    pub fn byte(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).copied()
    }
}

impl fmt::Display for HexHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

impl FromStr for HexHash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s)
    }
}

impl TryFrom<String> for HexHash {
    type Error = HashError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        normalize(&value)
    }
}

impl From<HexHash> for String {
    fn from(hash: HexHash) -> Self {
        hash.hex
    }
}

impl AsRef<str> for HexHash {
    fn as_ref(&self) -> &str {
        &self.hex
    }
}
