use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::distance::DistanceBucket;
use crate::hash::HexHash;
use crate::matching::{MatchPolicy, MatchResult};
use crate::offset::ComplexOffset;
use crate::token::TokenMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyMode {
    #[default]
    Simple,
    /// May derive a secondary block and compare once more.
    Complex,
}

/// Knobs that originate from user-entered form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyParams {
    pub token_size: usize,
    pub token_mode: TokenMode,
    pub policy: MatchPolicy,
    /// Match-selection limit.
    pub max_matches: usize,
    /// Matches needed for a result to count as accepted.
    pub min_matches: usize,
}

impl VerifyParams {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            token_size: settings.token_size,
            token_mode: settings.token_mode,
            policy: settings.policy,
            max_matches: settings.max_matches,
            min_matches: settings.min_matches,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub guessed_hash: String,
    /// Hash of `target_block` as fetched by the caller.
    pub fetched_hash: String,
    pub target_block: u64,
    /// Chain height at the time of the fetch.
    pub current_block: u64,
    #[serde(default)]
    pub mode: VerifyMode,
}

/// Result of one comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub mode: VerifyMode,
    pub guessed_hash: HexHash,
    pub fetched_hash: HexHash,
    pub target_block: u64,
    /// Block whose hash was compared (target, or the derived block on retry).
    pub compared_block: u64,
    pub current_block: u64,
    pub token_mode: TokenMode,
    pub token_size: usize,
    pub guessed_tokens: usize,
    pub fetched_tokens: usize,
    pub matches: MatchResult,
    pub distance: u64,
    pub bucket: DistanceBucket,
    pub color: String,
    pub accepted: bool,
    pub attempts: u8,
    pub offset: Option<ComplexOffset>,
}

/// Complex-mode request to fetch `offset.derived_block` and compare again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefetchPlan {
    pub guessed_hash: HexHash,
    pub seed_hash: HexHash,
    pub target_block: u64,
    pub current_block: u64,
    pub params: VerifyParams,
    pub offset: ComplexOffset,
    pub first_attempt: VerificationReport,
}

impl RefetchPlan {
    pub fn block_to_fetch(&self) -> u64 {
        self.offset.derived_block
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Settled(VerificationReport),
    Refetch(Box<RefetchPlan>),
}
