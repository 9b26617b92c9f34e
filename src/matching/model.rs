use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::HashError;

/// How two token sequences are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Distinct values present on both sides, regardless of position.
    #[default]
    Set,
    /// `a[i] == b[i]` over the shared index range. With `strict`, the two
    /// sequences must have the same length.
    Positional {
        #[serde(default)]
        strict: bool,
    },
}

impl FromStr for MatchPolicy {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "set" => Ok(MatchPolicy::Set),
            "positional" => Ok(MatchPolicy::Positional { strict: false }),
            "positional-strict" | "positional_strict" => {
                Ok(MatchPolicy::Positional { strict: true })
            }
            other => Err(HashError::format(format!("unknown match policy {other:?}"))),
        }
    }
}

/// A token found on both sides, with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMatch {
    pub token: String,
    pub index_a: usize,
    pub index_b: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub policy: MatchPolicy,
    pub matches: Vec<TokenMatch>,
}

impl MatchResult {
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Matched token values, in result order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.matches.iter().map(|m| m.token.as_str())
    }

    /// Keep at most `max` matches, preserving order.
    pub fn limited(mut self, max: usize) -> Self {
        self.matches.truncate(max);
        self
    }
}
