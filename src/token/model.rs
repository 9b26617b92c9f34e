use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::tokenize;
use crate::error::{HashError, Result};

/// Tokenization strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenMode {
    /// Overlapping windows, one per starting offset.
    #[default]
    #[serde(alias = "sliding")]
    SlidingWindow,
    /// Non-overlapping pieces.
    Chunked,
}

impl fmt::Display for TokenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenMode::SlidingWindow => f.write_str("sliding_window"),
            TokenMode::Chunked => f.write_str("chunked"),
        }
    }
}

impl FromStr for TokenMode {
    type Err = HashError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sliding" | "sliding_window" | "sliding-window" => Ok(TokenMode::SlidingWindow),
            "chunked" | "chunk" => Ok(TokenMode::Chunked),
            other => Err(HashError::format(format!("unknown token mode {other:?}"))),
        }
    }
}

/// Ordered tokens of one hash, together with how they were produced.
/// Sliding-window sets may contain duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    pub mode: TokenMode,
    pub size: usize,
    pub tokens: Vec<String>,
}

impl TokenSet {
    pub fn build(hash: &str, size: usize, mode: TokenMode) -> Result<Self> {
        Ok(Self {
            mode,
            size,
            tokens: tokenize(hash, size, mode)?,
        })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }
}
