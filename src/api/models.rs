use crate::config::Settings;
use crate::distance::{DistanceBucket, Thresholds};
use crate::matching::MatchPolicy;
use crate::offset::ComplexOffset;
use crate::token::TokenMode;
use crate::verify::{RefetchPlan, VerificationReport, VerifyMode, VerifyRequest, Verifier};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

/// A complex-mode verification waiting for the caller to fetch the derived block.
#[derive(Clone)]
pub struct PendingVerification {
    pub plan: RefetchPlan,
    pub created_at: i64,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct VerifyStats {
    pub settled: u64,
    pub accepted: u64,
    pub refetches_requested: u64,
    pub resumed: u64,
    pub expired: u64,
    pub buckets: BTreeMap<DistanceBucket, u64>,
    pub last_verified_at: Option<i64>,
}

impl VerifyStats {
    pub fn record(&mut self, report: &VerificationReport, now: i64) {
        self.settled += 1;
        if report.accepted {
            self.accepted += 1;
        }
        *self.buckets.entry(report.bucket).or_insert(0) += 1;
        self.last_verified_at = Some(now);
    }
}

/// Shared application state: settings, the verifier and pending refetches.
pub struct AppState {
    pub settings: Settings,
    pub verifier: Verifier,
    pub pending: Mutex<HashMap<String, PendingVerification>>,
    pub stats: Mutex<VerifyStats>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let verifier = Verifier::new(&settings);
        let buckets = DistanceBucket::ALL.iter().map(|b| (*b, 0)).collect();
        Self {
            settings,
            verifier,
            pending: Mutex::new(HashMap::new()),
            stats: Mutex::new(VerifyStats {
                buckets,
                ..VerifyStats::default()
            }),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

/* ---------- Hash API Models ---------- */

#[derive(Deserialize)]
pub struct HashRequest {
    pub hash: String,
}

#[derive(Serialize)]
pub struct NormalizeResponse {
    pub hash: String,
    pub prefixed: String,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub expected_length: usize,
}

#[derive(Deserialize)]
pub struct TokenizeRequest {
    pub hash: String,
    pub size: usize,
    #[serde(default)]
    pub mode: TokenMode,
}

#[derive(Serialize)]
pub struct TokenizeResponse {
    pub mode: TokenMode,
    pub size: usize,
    pub count: usize,
    pub tokens: Vec<String>,
}

/* ---------- Classify / Offset API Models ---------- */

#[derive(Deserialize)]
pub struct ClassifyRequest {
    pub distance: u64,
    #[serde(default)]
    pub mode: VerifyMode,
    /// Overrides the mode's configured triple.
    pub thresholds: Option<Thresholds>,
}

#[derive(Serialize)]
pub struct ClassifyResponse {
    pub distance: u64,
    pub thresholds: Thresholds,
    pub bucket: DistanceBucket,
    pub rank: u8,
    pub color: &'static str,
}

#[derive(Deserialize)]
pub struct OffsetRequest {
    pub seed_hash: String,
    pub target_block: u64,
    #[serde(default)]
    pub mode: VerifyMode,
    /// Overrides the mode's configured modulus.
    pub modulus: Option<u64>,
}

#[derive(Serialize)]
pub struct OffsetResponse {
    pub seed_hash: String,
    pub target_block: u64,
    pub modulus: u64,
    #[serde(flatten)]
    pub offset: ComplexOffset,
}

/* ---------- Verify API Models ---------- */

#[derive(Deserialize)]
pub struct VerifyBody {
    #[serde(flatten)]
    pub request: VerifyRequest,
    pub token_size: Option<usize>,
    pub token_mode: Option<TokenMode>,
    pub policy: Option<MatchPolicy>,
    pub max_matches: Option<usize>,
    pub min_matches: Option<usize>,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerifyResponse {
    Settled {
        report: VerificationReport,
    },
    Refetch {
        verification_id: String,
        fetch_block: u64,
        offset: ComplexOffset,
        expires_at: i64,
        first_attempt: VerificationReport,
    },
}

#[derive(Deserialize)]
pub struct ResumeRequest {
    pub verification_id: String,
    pub fetched_hash: String,
    /// Block the caller fetched; checked against the plan when present.
    #[serde(default)]
    pub block_number: Option<u64>,
}

/* ---------- Stats API Models ---------- */

#[derive(Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: VerifyStats,
    pub pending: usize,
    pub pending_ttl_secs: i64,
}
