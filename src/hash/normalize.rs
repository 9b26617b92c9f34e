use super::{HASH_BYTE_LEN, HASH_HEX_LEN, HEX_PREFIX, HexHash};
use crate::error::{HashError, Result};

/// Remove one leading "0x"/"0X" if present.
pub fn strip_prefix(input: &str) -> &str {
    input
        .strip_prefix(HEX_PREFIX)
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input)
}

/// Prepend "0x" to an unprefixed hex string (idempotent on prefixed input).
pub fn with_prefix(hex: &str) -> String {
    format!("{HEX_PREFIX}{}", strip_prefix(hex))
}

/// Strip the prefix and check the character class only (any non-zero length).
pub fn validate_hex(input: &str) -> Result<&str> {
    let hex = strip_prefix(input.trim());
    if hex.is_empty() {
        return Err(HashError::format("hex string is empty"));
    }
    if let Some((pos, c)) = hex.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
        return Err(HashError::format(format!(
            "invalid hex character {c:?} at position {pos}"
        )));
    }
    Ok(hex)
}

/// Parse `input` into a canonical 32-byte `HexHash`.
///
/// Accepts an optional "0x"/"0X" prefix and either letter case. Anything that
/// is not exactly 64 hex characters after the prefix is a `FormatError`;
/// input is never truncated or padded.
pub fn normalize(input: &str) -> Result<HexHash> {
    let hex = validate_hex(input)?;
    if hex.len() != HASH_HEX_LEN {
        return Err(HashError::format(format!(
            "expected {HASH_HEX_LEN} hex characters, got {}",
            hex.len()
        )));
    }

    let mut bytes = [0u8; HASH_BYTE_LEN];
    hex::decode_to_slice(hex, &mut bytes).map_err(|e| HashError::format(e.to_string()))?;
    Ok(HexHash::from_parts(hex::encode(bytes), bytes))
}

/// Pre-submission gate: true iff the unprefixed form is exactly
/// `expected_len` hex characters.
pub fn is_valid_format(input: &str, expected_len: usize) -> bool {
    match validate_hex(input) {
        Ok(hex) => hex.len() == expected_len,
        Err(_) => false,
    }
}
