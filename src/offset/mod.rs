use serde::{Deserialize, Serialize};

use crate::error::{HashError, Result};
use crate::hash::HexHash;

/// Byte of the seed hash used for complex-mode derivation: the first byte,
/// i.e. characters [0:2] of the canonical (unprefixed) string.
pub const SEED_BYTE_INDEX: usize = 0;

/// Modulus applied in simple mode.
pub const SIMPLE_MODULUS: u64 = 100;

/// Modulus applied in complex mode.
pub const COMPLEX_MODULUS: u64 = 256;

/// Secondary block derived from a seed hash. Computed once per
/// (seed, target block) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexOffset {
    pub byte_value: u8,
    pub offset: u64,
    pub derived_block: u64,
}

/// `derived_block = target_block - (seed[SEED_BYTE_INDEX] % modulus)`.
pub fn derive_offset(seed: &HexHash, target_block: u64, modulus: u64) -> Result<ComplexOffset> {
    if modulus == 0 {
        return Err(HashError::range("modulus must be > 0"));
    }
    let byte_value = seed
        .byte(SEED_BYTE_INDEX)
        .ok_or_else(|| HashError::format("seed hash has no byte at the derivation index"))?;
    let offset = u64::from(byte_value) % modulus;
    let derived_block = target_block.checked_sub(offset).ok_or_else(|| {
        HashError::range(format!(
            "derived block would be negative (target {target_block} - offset {offset})"
        ))
    })?;

    Ok(ComplexOffset {
        byte_value,
        offset,
        derived_block,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::hash::normalize;
    use sha2::{Digest, Sha256};

    fn seed(first_byte: &str) -> HexHash {
        normalize(&format!("0x{first_byte}{}", "0".repeat(62))).unwrap()
    }

    #[test]
    fn uses_first_byte() {
        let o = derive_offset(&seed("ff"), 1_000, COMPLEX_MODULUS).unwrap();
        assert_eq!(o.byte_value, 0xff);
        assert_eq!(o.offset, 255);
        assert_eq!(o.derived_block, 745);

        let o = derive_offset(&seed("ff"), 1_000, SIMPLE_MODULUS).unwrap();
        assert_eq!(o.offset, 55);
        assert_eq!(o.derived_block, 945);
    }

    #[test]
    fn never_negative_when_target_covers_modulus() {
        for i in 0u32..200 {
            let digest = Sha256::digest(i.to_le_bytes());
            let h = normalize(&hex::encode(digest)).unwrap();
            for modulus in [SIMPLE_MODULUS, COMPLEX_MODULUS] {
                let o = derive_offset(&h, modulus, modulus).unwrap();
                assert!(o.offset < modulus);
                assert_eq!(o.derived_block + o.offset, modulus);
            }
        }
    }

    #[test]
    fn below_zero_is_a_range_error() {
        let err = derive_offset(&seed("80"), 100, COMPLEX_MODULUS).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);

        // exactly zero is allowed
        let o = derive_offset(&seed("80"), 128, COMPLEX_MODULUS).unwrap();
        assert_eq!(o.derived_block, 0);
    }

    #[test]
    fn zero_modulus_is_rejected() {
        let err = derive_offset(&seed("01"), 10, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn deterministic() {
        let h = seed("3c");
        assert_eq!(
            derive_offset(&h, 5_000, COMPLEX_MODULUS).unwrap(),
            derive_offset(&h, 5_000, COMPLEX_MODULUS).unwrap()
        );
    }
}
