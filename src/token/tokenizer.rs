use super::{MAX_TOKEN_SIZE, MIN_TOKEN_SIZE, TokenMode};
use crate::error::{HashError, Result};
use crate::hash::validate_hex;

fn check_size(len: usize, size: usize) -> Result<()> {
    if size == 0 {
        return Err(HashError::range("token size must be > 0"));
    }
    if size > len {
        return Err(HashError::range(format!(
            "token size {size} exceeds input length {len}"
        )));
    }
    Ok(())
}

/// Overlapping windows: `hash[i..i + size]` for every `i` in `0..=len - size`.
pub fn tokenize_sliding_window(hash: &str, size: usize) -> Result<Vec<String>> {
    let hex = validate_hex(hash)?;
    let len = hex.len();
    check_size(len, size)?;
    Ok((0..=len - size)
        .map(|i| hex[i..i + size].to_string())
        .collect())
}

/// Non-overlapping pieces of `size`; the last one may be shorter.
pub fn tokenize_chunked(hash: &str, size: usize) -> Result<Vec<String>> {
    let hex = validate_hex(hash)?;
    let len = hex.len();
    check_size(len, size)?;
    Ok((0..len)
        .step_by(size)
        .map(|i| hex[i..(i + size).min(len)].to_string())
        .collect())
}

/// Dispatch on a named strategy.
///
/// Both sides of one verification must be tokenized with the same `mode`;
/// mixing modes is a caller error and is not detected here.
pub fn tokenize(hash: &str, size: usize, mode: TokenMode) -> Result<Vec<String>> {
    match mode {
        TokenMode::SlidingWindow => tokenize_sliding_window(hash, size),
        TokenMode::Chunked => tokenize_chunked(hash, size),
    }
}

/// Form-level bound on user-chosen token sizes.
pub fn validate_token_size(size: usize) -> Result<usize> {
    if !(MIN_TOKEN_SIZE..=MAX_TOKEN_SIZE).contains(&size) {
        return Err(HashError::range(format!(
            "token size must be between {MIN_TOKEN_SIZE} and {MAX_TOKEN_SIZE}, got {size}"
        )));
    }
    Ok(size)
}
