pub mod model;
pub mod normalize;

pub use model::HexHash;
pub use normalize::{is_valid_format, normalize, validate_hex, with_prefix};

/// Number of hex characters in a canonical block/transaction hash.
pub const HASH_HEX_LEN: usize = 64;

/// Number of bytes in a canonical hash.
pub const HASH_BYTE_LEN: usize = HASH_HEX_LEN / 2;

/// Prefix accepted (and emitted by `with_prefix`) on hex strings.
pub const HEX_PREFIX: &str = "0x";
